use std::io::Read;

use crate::command::CommandRecord;
use csv::{DeserializeRecordsIntoIter, Trim};

/// Parses a ledger script in CSV format, one [`CommandRecord`] per row,
/// paired with the line the row starts on.
pub struct CsvCommandParser<R> {
    iter: DeserializeRecordsIntoIter<R, CommandRecord>,
}

impl<R> CsvCommandParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvCommandParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<CommandRecord>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::command::CommandKind;

    use super::*;

    #[test]
    fn parse_rows_with_empty_fields() {
        let input = "type, tx, account, to, amount\n\
                     open, , alice, , 100\n\
                     transfer, 1, alice, bob, 2.5\n\
                     rollback, 1, , ,\n";
        let rows: Vec<_> = CsvCommandParser::new(input.as_bytes())
            .map(|(line, row)| (line, row.unwrap()))
            .collect();
        assert_eq!(rows.len(), 3);

        let (_, open) = &rows[0];
        assert_eq!(open.kind, CommandKind::Open);
        assert_eq!(open.tx, None);
        assert_eq!(open.account.as_deref(), Some("alice"));
        assert_eq!(open.to, None);
        assert_eq!(open.amount, Some(Decimal::from(100)));

        let (_, transfer) = &rows[1];
        assert_eq!(transfer.kind, CommandKind::Transfer);
        assert_eq!(transfer.to.as_deref(), Some("bob"));
        assert_eq!(transfer.amount, Some(Decimal::new(25, 1)));

        let (line, rollback) = &rows[2];
        assert_eq!(*line, 4);
        assert_eq!(rollback.kind, CommandKind::Rollback);
        assert_eq!(rollback.tx, Some(1));
        assert_eq!(rollback.amount, None);
    }

    #[test]
    fn unknown_command_is_an_error() {
        let input = "type,tx,account,to,amount\nfreeze,1,alice,,\n";
        let mut parser = CsvCommandParser::new(input.as_bytes());
        let (line, row) = parser.next().unwrap();
        assert_eq!(line, 2);
        assert!(row.is_err());
    }
}
