use crate::domain::payment::PaymentRequest;
use crate::error::{PaymentError, Result};
use std::io::Read;

/// Reads payment requests from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<PaymentRequest>`. It handles whitespace trimming and flexible
/// record lengths automatically.
pub struct PaymentRequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentRequestReader<R> {
    /// Creates a new `PaymentRequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes requests,
    /// allowing large files to be processed in a streaming fashion.
    pub fn requests(self) -> impl Iterator<Item = Result<PaymentRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::provider::PaymentProvider;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "amount, currency, provider, description\n\
                    100.00, TRY, PARAM, First payment\n\
                    25.50, USD, PAPARA,";
        let reader = PaymentRequestReader::new(data.as_bytes());
        let results: Vec<Result<PaymentRequest>> = reader.requests().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.amount, dec!(100.00));
        assert_eq!(first.provider, Some(PaymentProvider::Param));
        assert_eq!(first.description.as_deref(), Some("First payment"));

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.currency, "USD");
        assert_eq!(second.description, None);
    }

    #[test]
    fn test_reader_missing_provider_yields_none() {
        let data = "amount, currency, provider, description\n100.00, TRY, ,";
        let reader = PaymentRequestReader::new(data.as_bytes());
        let results: Vec<Result<PaymentRequest>> = reader.requests().collect();

        assert_eq!(results[0].as_ref().unwrap().provider, None);
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "amount, currency, provider, description\nnot_a_number, TRY, PARAM,";
        let reader = PaymentRequestReader::new(data.as_bytes());
        let results: Vec<Result<PaymentRequest>> = reader.requests().collect();

        assert!(results[0].is_err());
    }
}
