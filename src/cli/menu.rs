//! Interactive text menu
//!
//! A thin prompt loop over a [`Ledger`]. Input and output are generic so the
//! menu can be driven from tests as easily as from a terminal. End of input at
//! any prompt ends the session.

use crate::core::rules::{parse_age, parse_amount, round_amount};
use crate::core::Ledger;
use crate::selftest::{run_self_test, write_report};
use crate::types::{AccountNumber, LedgerError};
use std::io::{self, BufRead, Write};

/// Whether the menu loop keeps going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

/// Reads one trimmed line, or returns `Step::Exit` from the caller on EOF
macro_rules! prompt_or_exit {
    ($menu:expr, $label:expr) => {
        match $menu.prompt($label)? {
            Some(line) => line,
            None => return Ok(Step::Exit),
        }
    };
}

pub struct Menu<'a, R: BufRead, W: Write> {
    ledger: &'a mut Ledger,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(ledger: &'a mut Ledger, input: R, output: W) -> Self {
        Menu {
            ledger,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let choice = match self.prompt("Enter your choice (1-8): ")? {
                Some(choice) => choice,
                None => break,
            };

            let step = match choice.as_str() {
                "1" => self.create_account()?,
                "2" => self.set_pin()?,
                "3" => self.deposit()?,
                "4" => self.withdraw()?,
                "5" => self.view_balance()?,
                "6" => self.history()?,
                "7" => self.self_test()?,
                "8" => Step::Exit,
                _ => {
                    writeln!(self.output, "Invalid choice. Enter 1-8.")?;
                    Step::Continue
                }
            };

            if step == Step::Exit {
                break;
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let line = "-".repeat(50);
        writeln!(self.output, "{}", line)?;
        writeln!(self.output, "Welcome to Simple Banking System (PIN-secured Interactive Mode)")?;
        writeln!(self.output, "1. Create New Account (optionally set PIN now)")?;
        writeln!(self.output, "2. Set / Update PIN for an account")?;
        writeln!(self.output, "3. Deposit Money (requires PIN)")?;
        writeln!(self.output, "4. Withdraw Money (requires PIN)")?;
        writeln!(self.output, "5. View Balance (requires PIN)")?;
        writeln!(self.output, "6. View Transaction History (requires PIN)")?;
        writeln!(self.output, "7. Run Automated Tests")?;
        writeln!(self.output, "8. Exit")?;
        writeln!(self.output, "{}", line)
    }

    /// Print a label and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report_error(&mut self, error: &LedgerError) -> io::Result<()> {
        writeln!(self.output, "Error: {}", error)
    }

    fn currency(&self) -> String {
        self.ledger.config().currency_symbol.clone()
    }

    /// Ask for a PIN twice until both entries match
    fn confirmed_pin(&mut self, label: &str) -> io::Result<Option<String>> {
        loop {
            let pin = match self.prompt(label)? {
                Some(pin) => pin,
                None => return Ok(None),
            };
            let confirmation = match self.prompt("Confirm PIN: ")? {
                Some(pin) => pin,
                None => return Ok(None),
            };

            if pin == confirmation {
                return Ok(Some(pin));
            }
            writeln!(self.output, "Pins do not match. Try again.")?;
        }
    }

    /// Loops until an account is created or the user cancels with `c`
    fn create_account(&mut self) -> io::Result<Step> {
        let minimum_age = self.ledger.config().minimum_age;

        loop {
            writeln!(self.output, "\n(Enter 'c' at name prompt to cancel account creation)\n")?;
            let name = prompt_or_exit!(self, "Enter full name: ");
            if name.eq_ignore_ascii_case("c") {
                writeln!(self.output, "Account creation cancelled by user.")?;
                return Ok(Step::Continue);
            }

            let age_input = prompt_or_exit!(self, "Enter age: ");
            let age = match parse_age(&age_input) {
                Ok(age) => age,
                Err(_) => {
                    writeln!(self.output, "Invalid age input. Please enter a valid integer age.")?;
                    continue;
                }
            };
            if age < minimum_age {
                writeln!(
                    self.output,
                    "Age is not over {}. You cannot create account.",
                    minimum_age
                )?;
                continue;
            }

            let with_pin = prompt_or_exit!(self, "Do you want to set a 4-digit PIN now? (y/n): ");
            if with_pin.eq_ignore_ascii_case("y") {
                loop {
                    let pin = match self.confirmed_pin("Enter 4-digit PIN: ")? {
                        Some(pin) => pin,
                        None => return Ok(Step::Exit),
                    };
                    match self.ledger.create_account(&name, age, Some(pin.as_str())) {
                        Ok(number) => {
                            writeln!(self.output, "Account created: {} (PIN set)", number)?;
                            return Ok(Step::Continue);
                        }
                        Err(e @ LedgerError::Validation { field: "pin", .. }) => {
                            self.report_error(&e)?;
                        }
                        Err(e) => {
                            self.report_error(&e)?;
                            break;
                        }
                    }
                }
            } else {
                match self.ledger.create_account(&name, age, None) {
                    Ok(number) => {
                        writeln!(
                            self.output,
                            "Account created: {} (No PIN set). Use option 2 to set PIN.",
                            number
                        )?;
                        return Ok(Step::Continue);
                    }
                    Err(e) => self.report_error(&e)?,
                }
            }
        }
    }

    fn set_pin(&mut self) -> io::Result<Step> {
        let account = AccountNumber::from(prompt_or_exit!(self, "Account number: "));

        loop {
            let pin = match self.confirmed_pin("Enter new 4-digit PIN: ")? {
                Some(pin) => pin,
                None => return Ok(Step::Exit),
            };
            match self.ledger.set_pin(&account, &pin) {
                Ok(()) => {
                    writeln!(self.output, "PIN set/updated successfully.")?;
                    return Ok(Step::Continue);
                }
                Err(e @ LedgerError::Validation { .. }) => self.report_error(&e)?,
                Err(e) => {
                    self.report_error(&e)?;
                    return Ok(Step::Continue);
                }
            }
        }
    }

    fn deposit(&mut self) -> io::Result<Step> {
        let account = AccountNumber::from(prompt_or_exit!(self, "Account number: "));
        let pin = prompt_or_exit!(self, "Enter 4-digit PIN: ");
        let raw_amount = prompt_or_exit!(self, "Amount to deposit: ");

        // Report the amount as applied, after rounding
        let result = parse_amount(&raw_amount).and_then(|amount| {
            let balance = self.ledger.deposit(&account, amount, &pin)?;
            Ok((round_amount(amount), balance))
        });
        match result {
            Ok((amount, balance)) => {
                let symbol = self.currency();
                writeln!(
                    self.output,
                    "Deposited {}{:.2}. New balance: {}{:.2}",
                    symbol, amount, symbol, balance
                )?;
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(Step::Continue)
    }

    fn withdraw(&mut self) -> io::Result<Step> {
        let account = AccountNumber::from(prompt_or_exit!(self, "Account number: "));
        let pin = prompt_or_exit!(self, "Enter 4-digit PIN: ");
        let raw_amount = prompt_or_exit!(self, "Amount to withdraw: ");

        // Report the amount as applied, after rounding
        let result = parse_amount(&raw_amount).and_then(|amount| {
            let balance = self.ledger.withdraw(&account, amount, &pin)?;
            Ok((round_amount(amount), balance))
        });
        match result {
            Ok((amount, balance)) => {
                let symbol = self.currency();
                writeln!(
                    self.output,
                    "Withdrawn {}{:.2}. New balance: {}{:.2}",
                    symbol, amount, symbol, balance
                )?;
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(Step::Continue)
    }

    fn view_balance(&mut self) -> io::Result<Step> {
        let account = AccountNumber::from(prompt_or_exit!(self, "Account number: "));
        let pin = prompt_or_exit!(self, "Enter 4-digit PIN: ");

        match self.ledger.view_balance(&account, &pin) {
            Ok(balance) => {
                let symbol = self.currency();
                writeln!(self.output, "Current balance: {}{:.2}", symbol, balance)?;
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(Step::Continue)
    }

    fn history(&mut self) -> io::Result<Step> {
        let account = AccountNumber::from(prompt_or_exit!(self, "Account number: "));
        let pin = prompt_or_exit!(self, "Enter 4-digit PIN: ");

        match self.ledger.transaction_history(&account, &pin) {
            Ok(history) => {
                let symbol = self.currency();
                writeln!(self.output, "Transaction history for {}:", account)?;
                for record in history {
                    writeln!(
                        self.output,
                        "  {} - {}: {}{:.2}",
                        record.formatted_timestamp(),
                        record.kind,
                        symbol,
                        record.amount
                    )?;
                }
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(Step::Continue)
    }

    fn self_test(&mut self) -> io::Result<Step> {
        let outcomes = run_self_test(self.ledger.config());
        write_report(&outcomes, &mut self.output)?;
        Ok(Step::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Cursor;

    /// Drive the menu with scripted input and return everything it printed
    fn run_menu(ledger: &mut Ledger, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(ledger, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_exit_option() {
        let mut ledger = Ledger::new();
        let output = run_menu(&mut ledger, "8\n");
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_end_of_input_exits_cleanly() {
        let mut ledger = Ledger::new();
        let output = run_menu(&mut ledger, "");
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_invalid_choice() {
        let mut ledger = Ledger::new();
        let output = run_menu(&mut ledger, "9\n8\n");
        assert!(output.contains("Invalid choice. Enter 1-8."));
    }

    #[test]
    fn test_create_with_pin_after_mismatch_and_underage() {
        let mut ledger = Ledger::new();
        let script = "1\n\
                      Ravi\n15\n\
                      Sai\nabc\n\
                      Sai\n22\ny\n1234\n4321\n1234\n1234\n\
                      8\n";

        let output = run_menu(&mut ledger, script);

        assert!(output.contains("Age is not over 18. You cannot create account."));
        assert!(output.contains("Invalid age input. Please enter a valid integer age."));
        assert!(output.contains("Pins do not match. Try again."));
        assert!(output.contains("Account created: 1001 (PIN set)"));
        assert_eq!(ledger.accounts().len(), 1);
        assert_eq!(
            ledger.authenticate(&AccountNumber::from("1001"), "1234"),
            Ok(true)
        );
    }

    #[test]
    fn test_create_with_malformed_pin_retries() {
        let mut ledger = Ledger::new();
        let script = "1\nSai\n22\ny\n12\n12\n5678\n5678\n8\n";

        let output = run_menu(&mut ledger, script);

        assert!(output.contains("Error: Invalid pin"));
        assert!(output.contains("Account created: 1001 (PIN set)"));
        assert_eq!(ledger.accounts().len(), 1);
    }

    #[test]
    fn test_create_without_pin_then_cancel() {
        let mut ledger = Ledger::new();
        let script = "1\nAsha\n30\nn\n1\nc\n8\n";

        let output = run_menu(&mut ledger, script);

        assert!(output.contains("Account created: 1001 (No PIN set). Use option 2 to set PIN."));
        assert!(output.contains("Account creation cancelled by user."));
        assert_eq!(ledger.accounts().len(), 1);
    }

    #[test]
    fn test_set_pin_on_unknown_account_returns_to_menu() {
        let mut ledger = Ledger::new();
        let output = run_menu(&mut ledger, "2\n9999\n1234\n1234\n8\n");
        assert!(output.contains("Error: Account 9999 not found"));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_money_flow() {
        let mut ledger = Ledger::new();
        let number = ledger.create_account("Sai", 22, None).unwrap();
        let script = "2\n1001\n1234\n1234\n\
                      3\n1001\n1234\n500\n\
                      4\n1001\n1234\n100\n\
                      4\n1001\n1234\n2000\n\
                      3\n1001\n1234\nlots\n\
                      5\n1001\n0000\n\
                      5\n1001\n1234\n\
                      6\n1001\n1234\n\
                      8\n";

        let output = run_menu(&mut ledger, script);

        assert!(output.contains("PIN set/updated successfully."));
        assert!(output.contains("Deposited ₹500.00. New balance: ₹500.00"));
        assert!(output.contains("Withdrawn ₹100.00. New balance: ₹400.00"));
        assert!(output.contains("Error: Insufficient funds in account 1001"));
        assert!(output.contains("Error: Invalid amount: Amount must be numeric"));
        assert!(output.contains("Error: Invalid PIN for account 1001"));
        assert!(output.contains("Current balance: ₹400.00"));
        assert!(output.contains("Transaction history for 1001:"));
        assert!(output.contains("ACCOUNT_CREATED: ₹0.00"));
        assert!(output.contains("DEPOSIT: ₹500.00"));
        assert!(output.contains("WITHDRAWAL: ₹100.00"));
        assert_eq!(ledger.view_balance(&number, "1234"), Ok(Decimal::new(400, 0)));
    }

    #[test]
    fn test_self_test_option_leaves_ledger_untouched() {
        let mut ledger = Ledger::new();
        let output = run_menu(&mut ledger, "7\n8\n");

        assert!(output.contains("TEST CASE EXECUTION REPORT"));
        assert!(!output.contains("FAIL"));
        assert!(ledger.accounts().is_empty());
    }

    #[test]
    fn test_money_messages_show_rounded_amounts() {
        let mut ledger = Ledger::new();
        let number = ledger.create_account("Sai", 22, Some("1234")).unwrap();
        let script = "3\n1001\n1234\n10.005\n\
                      4\n1001\n1234\n0.015\n\
                      8\n";

        let output = run_menu(&mut ledger, script);

        assert!(output.contains("Deposited ₹10.00. New balance: ₹10.00"));
        assert!(output.contains("Withdrawn ₹0.02. New balance: ₹9.98"));
        assert_eq!(ledger.view_balance(&number, "1234"), Ok(Decimal::new(998, 2)));
    }
}
