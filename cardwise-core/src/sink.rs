//! Where reports send their progress and failure messages.
//!
//! Reports never log through a global logger directly; callers hand in a
//! sink. [`TracingSink`] forwards to `tracing`, [`NoopSink`] drops everything.

/// Receives messages emitted while a report runs.
pub trait ReportSink {
    fn info(&self, report: &'static str, message: &str);
    fn error(&self, report: &'static str, message: &str);
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ReportSink for NoopSink {
    fn info(&self, _report: &'static str, _message: &str) {}
    fn error(&self, _report: &'static str, _message: &str) {}
}

/// Forwards to `tracing` under `cardwise::reports::<report>`, so each report
/// can be filtered on its own. Unknown report names use `cardwise::reports`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

// `tracing` targets must be literals, hence one arm per report.
macro_rules! emit {
    ($level:ident, $report:expr, $message:expr) => {
        match $report {
            "monthly_cashback" => {
                tracing::$level!(target: "cardwise::reports::monthly_cashback", "{}", $message)
            }
            "category_spend" => {
                tracing::$level!(target: "cardwise::reports::category_spend", "{}", $message)
            }
            "card_summary" => {
                tracing::$level!(target: "cardwise::reports::card_summary", "{}", $message)
            }
            "top_transactions" => {
                tracing::$level!(target: "cardwise::reports::top_transactions", "{}", $message)
            }
            other => tracing::$level!(target: "cardwise::reports", report = other, "{}", $message),
        }
    };
}

impl ReportSink for TracingSink {
    fn info(&self, report: &'static str, message: &str) {
        emit!(info, report, message);
    }

    fn error(&self, report: &'static str, message: &str) {
        emit!(error, report, message);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::ReportSink;
    use std::cell::RefCell;

    /// Collects messages so tests can assert on what a report logged.
    #[derive(Default)]
    pub struct RecordingSink {
        pub infos: RefCell<Vec<String>>,
        pub errors: RefCell<Vec<String>>,
    }

    impl ReportSink for RecordingSink {
        fn info(&self, report: &'static str, message: &str) {
            self.infos.borrow_mut().push(format!("{report}: {message}"));
        }

        fn error(&self, report: &'static str, message: &str) {
            self.errors.borrow_mut().push(format!("{report}: {message}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::Subscriber;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    #[derive(Clone, Default)]
    struct Targets(Arc<Mutex<Vec<(String, tracing::Level)>>>);

    impl<S: Subscriber> Layer<S> for Targets {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let meta = event.metadata();
            self.0.lock().unwrap().push((meta.target().to_string(), *meta.level()));
        }
    }

    #[test]
    fn test_each_report_logs_under_its_own_target() {
        let targets = Targets::default();
        let subscriber = tracing_subscriber::registry().with(targets.clone());

        tracing::subscriber::with_default(subscriber, || {
            TracingSink.info("monthly_cashback", "done");
            TracingSink.error("category_spend", "bad date");
            TracingSink.info("card_summary", "done");
            TracingSink.error("top_transactions", "bad amount");
            TracingSink.info("something_else", "done");
        });

        let seen = targets.0.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                ("cardwise::reports::monthly_cashback".to_string(), tracing::Level::INFO),
                ("cardwise::reports::category_spend".to_string(), tracing::Level::ERROR),
                ("cardwise::reports::card_summary".to_string(), tracing::Level::INFO),
                ("cardwise::reports::top_transactions".to_string(), tracing::Level::ERROR),
                ("cardwise::reports".to_string(), tracing::Level::INFO),
            ]
        );
    }
}
