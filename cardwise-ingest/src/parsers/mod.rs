pub mod bank_statement;
pub mod workbook;
