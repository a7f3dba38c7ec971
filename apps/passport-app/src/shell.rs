//! # Command Shell
//!
//! Line-oriented front end over the cart commands, one command per line.
//!
//! ```text
//! > add 1 2          add_to_cart("1", Some(2))
//! > inc 1            increment_cart_item("1")
//! > dec 1            decrement_cart_item("1")
//! > qty 1 5          update_cart_item("1", 5)
//! > rm 1             remove_from_cart("1")
//! > clear            clear_cart()
//! > toggle           toggle_cart(None)
//! > open | close     toggle_cart(Some(true | false))
//! > currency XOF     set_currency("XOF")
//! > currencies       list_currencies()
//! > show             get_cart()
//! > help | quit
//! ```
//!
//! Results and errors are printed as JSON, the same payloads the mobile UI
//! receives.

use serde::Serialize;

use crate::catalog::CatalogProvider;
use crate::commands::{self, CartResponse, CurrencyOption};
use crate::error::ApiError;
use crate::state::CartState;

pub const HELP: &str = "\
commands:
  add <id> [qty]     add a product (qty defaults to 1)
  inc <id>           one more unit
  dec <id>           one unit fewer (removes at 1)
  qty <id> <n>       set quantity (0 or less removes)
  rm <id>            remove a line
  clear              empty the cart
  toggle             flip the cart panel
  open | close       show or hide the cart panel
  currency <code>    EUR, USD or XOF
  currencies         list display currencies
  show               print the cart
  help               this text
  quit               exit";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add { id: String, quantity: Option<i64> },
    Increment(String),
    Decrement(String),
    SetQuantity { id: String, quantity: i64 },
    Remove(String),
    Clear,
    Toggle(Option<bool>),
    Currency(String),
    Currencies,
    Show,
    Help,
    Quit,
}

/// What a command produced.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ShellOutput {
    Cart(CartResponse),
    Currencies(Vec<CurrencyOption>),
    Text(&'static str),
    Quit,
}

impl ShellCommand {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ApiError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("add", [id]) => ShellCommand::Add {
                id: id.to_string(),
                quantity: None,
            },
            ("add", [id, qty]) => ShellCommand::Add {
                id: id.to_string(),
                quantity: Some(parse_quantity(qty)?),
            },
            ("inc", [id]) => ShellCommand::Increment(id.to_string()),
            ("dec", [id]) => ShellCommand::Decrement(id.to_string()),
            ("qty", [id, qty]) => ShellCommand::SetQuantity {
                id: id.to_string(),
                quantity: parse_quantity(qty)?,
            },
            ("rm", [id]) => ShellCommand::Remove(id.to_string()),
            ("clear", []) => ShellCommand::Clear,
            ("toggle", []) => ShellCommand::Toggle(None),
            ("open", []) => ShellCommand::Toggle(Some(true)),
            ("close", []) => ShellCommand::Toggle(Some(false)),
            ("currency", [code]) => ShellCommand::Currency(code.to_string()),
            ("currencies", []) => ShellCommand::Currencies,
            ("show", []) => ShellCommand::Show,
            ("help", _) => ShellCommand::Help,
            ("quit" | "exit", []) => ShellCommand::Quit,
            _ => {
                return Err(ApiError::validation(format!(
                    "Unrecognised command: {} (try 'help')",
                    line.trim()
                )))
            }
        };

        Ok(Some(command))
    }

    /// Runs the command against the cart.
    pub fn execute(
        self,
        catalog: &dyn CatalogProvider,
        cart: &CartState,
    ) -> Result<ShellOutput, ApiError> {
        let response = match self {
            ShellCommand::Add { id, quantity } => commands::add_to_cart(catalog, cart, &id, quantity)?,
            ShellCommand::Increment(id) => commands::increment_cart_item(cart, &id)?,
            ShellCommand::Decrement(id) => commands::decrement_cart_item(cart, &id)?,
            ShellCommand::SetQuantity { id, quantity } => {
                commands::update_cart_item(cart, &id, quantity)?
            }
            ShellCommand::Remove(id) => commands::remove_from_cart(cart, &id)?,
            ShellCommand::Clear => commands::clear_cart(cart)?,
            ShellCommand::Toggle(open) => commands::toggle_cart(cart, open)?,
            ShellCommand::Currency(code) => commands::set_currency(cart, &code)?,
            ShellCommand::Currencies => {
                return Ok(ShellOutput::Currencies(commands::list_currencies(cart)?))
            }
            ShellCommand::Show => commands::get_cart(cart)?,
            ShellCommand::Help => return Ok(ShellOutput::Text(HELP)),
            ShellCommand::Quit => return Ok(ShellOutput::Quit),
        };
        Ok(ShellOutput::Cart(response))
    }
}

fn parse_quantity(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::validation(format!("quantity must be a whole number, got '{}'", raw)))
}

/// Parses and runs one line, rendering the outcome as a JSON line.
///
/// Returns `None` for blank input and on `quit`.
pub fn run_line(line: &str, catalog: &dyn CatalogProvider, cart: &CartState) -> Option<String> {
    let outcome = ShellCommand::parse(line).and_then(|command| match command {
        Some(command) => command.execute(catalog, cart).map(Some),
        None => Ok(None),
    });

    let rendered = match outcome {
        Ok(None) | Ok(Some(ShellOutput::Quit)) => return None,
        Ok(Some(ShellOutput::Text(text))) => return Some(text.to_string()),
        Ok(Some(output)) => serde_json::to_string(&output),
        Err(err) => serde_json::to_string(&serde_json::json!({ "error": err })),
    };

    Some(rendered.unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ShellCommand::parse("   ").unwrap(), None);
        assert_eq!(
            ShellCommand::parse("add 3").unwrap(),
            Some(ShellCommand::Add {
                id: "3".into(),
                quantity: None
            })
        );
        assert_eq!(
            ShellCommand::parse("ADD 3 4").unwrap(),
            Some(ShellCommand::Add {
                id: "3".into(),
                quantity: Some(4)
            })
        );
        assert_eq!(
            ShellCommand::parse("qty 3 -1").unwrap(),
            Some(ShellCommand::SetQuantity {
                id: "3".into(),
                quantity: -1
            })
        );
        assert_eq!(
            ShellCommand::parse("close").unwrap(),
            Some(ShellCommand::Toggle(Some(false)))
        );
        assert_eq!(ShellCommand::parse("exit").unwrap(), Some(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(ShellCommand::parse("add").is_err());
        assert!(ShellCommand::parse("add 1 two").is_err());
        assert!(ShellCommand::parse("qty 1").is_err());
        assert!(ShellCommand::parse("checkout").is_err());
    }
}
