//! CSV format handling for replay scripts and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - OperationRecord structure for deserialization
//! - Conversion from CSV records to [`Operation`]s
//! - Account output serialization
//! - Transaction history export
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::core::rules::{parse_age, parse_amount};
use crate::types::{Account, AccountNumber, TransactionKind, TransactionRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the script format with columns: op, account, name, age, pin, amount.
/// Every column except `op` is optional because each operation only uses some
/// of them.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct OperationRecord {
    pub op: String,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub pin: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
}

/// A ledger call described by one script row
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Create {
        name: String,
        age: i32,
        pin: Option<String>,
    },
    SetPin {
        account: AccountNumber,
        pin: String,
    },
    Deposit {
        account: AccountNumber,
        amount: Decimal,
        pin: String,
    },
    Withdraw {
        account: AccountNumber,
        amount: Decimal,
        pin: String,
    },
    Balance {
        account: AccountNumber,
        pin: String,
    },
    History {
        account: AccountNumber,
        pin: String,
    },
}

/// Treat empty cells as missing
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(value: Option<String>, field: &str, op: &str) -> Result<String, String> {
    present(value).ok_or_else(|| format!("'{}' operation requires '{}'", op, field))
}

/// Convert an OperationRecord to an Operation
///
/// This function:
/// - Parses the operation name (case-insensitive)
/// - Checks that the columns the operation needs are present
/// - Parses ages and amounts
///
/// Ages and amounts are parsed here, PIN text is passed through unchanged so
/// the ledger can report malformed PINs itself.
///
/// # Returns
///
/// Result containing either:
/// - Ok(Operation) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_operation_record(record: OperationRecord) -> Result<Operation, String> {
    let op = record.op.trim().to_lowercase();

    match op.as_str() {
        "create" => {
            let name = required(record.name, "name", &op)?;
            let age = parse_age(&required(record.age, "age", &op)?).map_err(|e| e.to_string())?;
            Ok(Operation::Create {
                name,
                age,
                pin: present(record.pin),
            })
        }
        "set_pin" => Ok(Operation::SetPin {
            account: required(record.account, "account", &op)?.into(),
            pin: required(record.pin, "pin", &op)?,
        }),
        "deposit" | "withdraw" => {
            let account: AccountNumber = required(record.account, "account", &op)?.into();
            let pin = required(record.pin, "pin", &op)?;
            let amount =
                parse_amount(&required(record.amount, "amount", &op)?).map_err(|e| e.to_string())?;

            if op == "deposit" {
                Ok(Operation::Deposit {
                    account,
                    amount,
                    pin,
                })
            } else {
                Ok(Operation::Withdraw {
                    account,
                    amount,
                    pin,
                })
            }
        }
        "balance" => Ok(Operation::Balance {
            account: required(record.account, "account", &op)?.into(),
            pin: required(record.pin, "pin", &op)?,
        }),
        "history" => Ok(Operation::History {
            account: required(record.account, "account", &op)?.into(),
            pin: required(record.pin, "pin", &op)?,
        }),
        _ => Err(format!("Invalid operation: '{}'", record.op)),
    }
}

/// Write account states to CSV format
///
/// Writes accounts in CSV format with columns:
/// account, holder, balance, pin_set, transactions.
/// Accounts are written in the order given.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(accounts: &[&Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["account", "holder", "balance", "pin_set", "transactions"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for account in accounts {
        writer
            .write_record(&[
                account.number.to_string(),
                account.holder.clone(),
                format!("{:.2}", account.balance()),
                account.has_pin().to_string(),
                account.transactions().len().to_string(),
            ])
            .map_err(|e| format!("Failed to write account {}: {}", account.number, e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush CSV writer: {}", e))?;

    Ok(())
}

/// One exported history line
#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    account: &'a str,
    timestamp: String,
    kind: TransactionKind,
    amount: String,
}

/// Write transaction histories to CSV format
///
/// Columns: account, timestamp, kind, amount. Histories are written in the
/// order given, each in the order its records were appended. Amounts are
/// unsigned; the kind tells whether the balance went up or down.
pub fn write_history_csv(
    histories: &[(AccountNumber, Vec<TransactionRecord>)],
    output: &mut dyn Write,
) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer
        .write_record(["account", "timestamp", "kind", "amount"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for (account, records) in histories {
        for record in records {
            writer
                .serialize(HistoryRow {
                    account: account.as_str(),
                    timestamp: record.formatted_timestamp(),
                    kind: record.kind,
                    amount: format!("{:.2}", record.amount),
                })
                .map_err(|e| format!("Failed to write history of account {}: {}", account, e))?;
        }
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush CSV writer: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pin;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn record(op: &str, account: &str, name: &str, age: &str, pin: &str, amount: &str) -> OperationRecord {
        let cell = |v: &str| if v.is_empty() { None } else { Some(v.to_string()) };
        OperationRecord {
            op: op.to_string(),
            account: cell(account),
            name: cell(name),
            age: cell(age),
            pin: cell(pin),
            amount: cell(amount),
        }
    }

    #[rstest]
    #[case::create_with_pin(
        record("create", "", "Sai", "22", "1234", ""),
        Operation::Create { name: "Sai".to_string(), age: 22, pin: Some("1234".to_string()) }
    )]
    #[case::create_without_pin(
        record("CREATE", "", "Ravi", "15", "", ""),
        Operation::Create { name: "Ravi".to_string(), age: 15, pin: None }
    )]
    #[case::set_pin(
        record("set_pin", "1001", "", "", "9999", ""),
        Operation::SetPin { account: AccountNumber::from("1001"), pin: "9999".to_string() }
    )]
    #[case::deposit(
        record("deposit", "1001", "", "", "1234", "500"),
        Operation::Deposit { account: AccountNumber::from("1001"), amount: Decimal::new(500, 0), pin: "1234".to_string() }
    )]
    #[case::withdraw(
        record("Withdraw", "1001", "", "", "1234", "12.5"),
        Operation::Withdraw { account: AccountNumber::from("1001"), amount: Decimal::new(125, 1), pin: "1234".to_string() }
    )]
    #[case::balance(
        record("balance", "1001", "", "", "0000", ""),
        Operation::Balance { account: AccountNumber::from("1001"), pin: "0000".to_string() }
    )]
    #[case::history(
        record("history", "1001", "", "", "1234", ""),
        Operation::History { account: AccountNumber::from("1001"), pin: "1234".to_string() }
    )]
    fn test_convert_valid(#[case] input: OperationRecord, #[case] expected: Operation) {
        assert_eq!(convert_operation_record(input), Ok(expected));
    }

    #[rstest]
    #[case::unknown_op(record("transfer", "1001", "", "", "1234", "5"), "Invalid operation")]
    #[case::missing_name(record("create", "", "", "22", "", ""), "requires 'name'")]
    #[case::bad_age(record("create", "", "Sai", "old", "", ""), "Age must be an integer")]
    #[case::missing_amount(record("deposit", "1001", "", "", "1234", ""), "requires 'amount'")]
    #[case::bad_amount(record("withdraw", "1001", "", "", "1234", "lots"), "Amount must be numeric")]
    #[case::missing_pin(record("balance", "1001", "", "", "", ""), "requires 'pin'")]
    #[case::missing_account(record("history", "", "", "", "1234", ""), "requires 'account'")]
    #[case::blank_account(record("set_pin", "  ", "", "", "1234", ""), "requires 'account'")]
    fn test_convert_invalid(#[case] input: OperationRecord, #[case] expected_fragment: &str) {
        let err = convert_operation_record(input).unwrap_err();
        assert!(
            err.contains(expected_fragment),
            "'{}' does not contain '{}'",
            err,
            expected_fragment
        );
    }

    #[test]
    fn test_write_accounts_csv() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut first = Account::open(AccountNumber::from("1001"), "Sai".to_string(), at);
        first.set_pin(&Pin::parse("1234").unwrap());
        first.credit(Decimal::new(500, 0), at).unwrap();
        let second = Account::open(AccountNumber::from("1002"), "Asha Rao".to_string(), at);

        let mut output = Vec::new();
        write_accounts_csv(&[&first, &second], &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "account,holder,balance,pin_set,transactions\n\
             1001,Sai,500.00,true,2\n\
             1002,Asha Rao,0.00,false,1\n"
        );
    }

    #[test]
    fn test_write_accounts_csv_quotes_commas() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let account = Account::open(AccountNumber::from("1001"), "Rao, Asha".to_string(), at);

        let mut output = Vec::new();
        write_accounts_csv(&[&account], &mut output).unwrap();

        assert!(String::from_utf8(output)
            .unwrap()
            .contains("1001,\"Rao, Asha\",0.00,false,1"));
    }

    #[test]
    fn test_write_history_csv() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        let history = vec![
            TransactionRecord::new(TransactionKind::AccountCreated, Decimal::ZERO, at),
            TransactionRecord::new(TransactionKind::Deposit, Decimal::new(500, 0), at),
            TransactionRecord::new(TransactionKind::Withdrawal, Decimal::new(1050, 2), at),
        ];

        let mut output = Vec::new();
        write_history_csv(&[(AccountNumber::from("1001"), history)], &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "account,timestamp,kind,amount\n\
             1001,2024-03-09 14:05:00,ACCOUNT_CREATED,0.00\n\
             1001,2024-03-09 14:05:00,DEPOSIT,500.00\n\
             1001,2024-03-09 14:05:00,WITHDRAWAL,10.50\n"
        );
    }

    #[test]
    fn test_write_history_csv_empty() {
        let mut output = Vec::new();
        write_history_csv(&[], &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "account,timestamp,kind,amount\n");
    }
}
