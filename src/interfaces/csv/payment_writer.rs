use crate::domain::payment::Payment;
use crate::error::Result;
use std::io::Write;

/// Writes the outbound payment representation as CSV.
///
/// Columns follow the record shape: id, amount, currency, status, provider,
/// description.
pub struct PaymentWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PaymentWriter<W> {
    pub fn new(target: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(target),
        }
    }

    pub fn write_payments(&mut self, payments: Vec<Payment>) -> Result<()> {
        for payment in payments {
            self.writer.serialize(payment)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
