//! Drive both clients against a one-shot local HTTP server.

use cardwise_market::{CurrencyRate, ExchangeRatesClient, StockPrice, StockQuotesClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

fn local_http() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Serve `responses` in order, one per connection, reporting each request line.
async fn serve(responses: Vec<(u16, &'static str)>) -> (String, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let request = String::from_utf8_lossy(&buf).to_string();
            let _ = tx.send(request);

            let response = format!(
                "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
    });

    (format!("http://{addr}"), rx)
}

#[tokio::test]
async fn test_exchange_rates_per_currency() {
    let (base, mut requests) = serve(vec![
        (200, r#"{"success": true, "result": 92.349211}"#),
        (401, r#"{"message": "Invalid authentication credentials"}"#),
    ])
    .await;

    let client = ExchangeRatesClient::new("abc").with_base_url(base).with_http_client(local_http());
    let rates = client.rates(&["USD".to_string(), "EUR".to_string()]).await;

    assert_eq!(
        rates,
        vec![
            CurrencyRate { currency: "USD".to_string(), rate: Some(92.349211) },
            CurrencyRate { currency: "EUR".to_string(), rate: None },
        ]
    );

    let first = requests.recv().await.unwrap();
    assert!(first.starts_with("GET /exchangerates_data/convert?to=RUB&from=USD&amount=1 "));
    assert!(first.to_ascii_lowercase().contains("apikey: abc"));
}

#[tokio::test]
async fn test_stock_prices_per_symbol() {
    let (base, mut requests) = serve(vec![
        (200, r#"[{"symbol": "AAPL", "name": "Apple Inc.", "price": 145.775}]"#),
        (401, r#"{"Error Message": "Invalid API KEY."}"#),
    ])
    .await;

    let client = StockQuotesClient::new("abc").with_base_url(base).with_http_client(local_http());
    let prices = client.prices(&["AAPL".to_string(), "MSFT".to_string()]).await;

    assert_eq!(
        prices,
        vec![
            StockPrice { stock: "AAPL".to_string(), price: Some(145.775) },
            StockPrice { stock: "MSFT".to_string(), price: None },
        ]
    );

    let first = requests.recv().await.unwrap();
    assert!(first.starts_with("GET /api/v3/quote/AAPL?apikey=abc "));
}

#[tokio::test]
async fn test_unreachable_provider_yields_none() {
    // bind then drop so nothing listens on the port
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let client = StockQuotesClient::new("abc").with_base_url(format!("http://{addr}"))
        .with_http_client(local_http());
    let prices = client.prices(&["AAPL".to_string()]).await;
    assert_eq!(prices, vec![StockPrice { stock: "AAPL".to_string(), price: None }]);
}
