//! # Console Front End
//!
//! Line-oriented driver for the register: one command per line on the
//! input, one JSON document per line on the output.
//!
//! ## Command Reference
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add <id> <price> <name...>    add one unit (price as "12.50")         │
//! │  qty <id> <n>                  set quantity (n ≤ 0 removes)            │
//! │  inc <id> / dec <id>           step quantity by one                    │
//! │  rm <id>                       remove the line                         │
//! │  customer <id> <name...>       attach customer ("customer none" clears)│
//! │  discount <amount>[%]          fixed or percentage ("discount none")   │
//! │  notes <text...>               replace notes (empty clears)            │
//! │  pay <cash|card|upi|wallet>    payment method                          │
//! │  clear | show | config         reset / print cart / print settings     │
//! │  checkout                      print the order request, reset cart     │
//! │  help | quit                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.
//!
//! ## Output
//! ```text
//! show      → {"cart":{"lines":[...],"totals":{...}}}
//! checkout  → {"order":{"lines":[...],"total":3717,...}}
//! bad input → {"error":{"code":"VALIDATION_ERROR","message":"..."}}
//! ```

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::commands::cart::{self, CartResponse};
use crate::commands::{checkout, config};
use crate::error::{ApiError, ErrorCode};
use crate::state::{RegisterConfig, RegisterSession};
use till_core::validation::{parse_discount, parse_price, parse_quantity};
use till_core::{CatalogProduct, CustomerRef, DiscountKind, OrderRequest, PaymentMethod};

const HELP: &str = "add <id> <price> <name...> | qty <id> <n> | inc <id> | dec <id> | rm <id> | \
customer <id> <name...>|none | discount <amount>[%]|none | notes <text...> | \
pay <cash|card|upi|wallet> | clear | show | config | checkout | help | quit";

// =============================================================================
// Parsing
// =============================================================================

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Add(CatalogProduct),
    Quantity { product_id: String, quantity: i64 },
    Increment(String),
    Decrement(String),
    Remove(String),
    Customer(Option<CustomerRef>),
    Discount(Option<till_core::DiscountSpec>),
    Notes(String),
    Pay(PaymentMethod),
    Clear,
    Show,
    Config,
    Checkout,
    Help,
    Quit,
}

/// Parses one input line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, ApiError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "add" => {
            let (id, rest) = next_word(rest, "product id")?;
            let (price, name) = next_word(rest, "price")?;
            ConsoleCommand::Add(CatalogProduct::new(id, name, parse_price(price)?))
        }
        "qty" => {
            let (id, rest) = next_word(rest, "product id")?;
            let (qty, _) = next_word(rest, "quantity")?;
            ConsoleCommand::Quantity {
                product_id: id.to_string(),
                quantity: parse_quantity(qty)?,
            }
        }
        "inc" => ConsoleCommand::Increment(next_word(rest, "product id")?.0.to_string()),
        "dec" => ConsoleCommand::Decrement(next_word(rest, "product id")?.0.to_string()),
        "rm" => ConsoleCommand::Remove(next_word(rest, "product id")?.0.to_string()),
        "customer" => {
            if rest.eq_ignore_ascii_case("none") {
                ConsoleCommand::Customer(None)
            } else {
                let (id, name) = next_word(rest, "customer id")?;
                ConsoleCommand::Customer(Some(CustomerRef::new(id, name)))
            }
        }
        "discount" => {
            if rest.eq_ignore_ascii_case("none") {
                ConsoleCommand::Discount(None)
            } else {
                let (amount, _) = next_word(rest, "discount")?;
                let kind = if amount.ends_with('%') {
                    DiscountKind::Percentage
                } else {
                    DiscountKind::Fixed
                };
                ConsoleCommand::Discount(Some(parse_discount(kind, amount)?))
            }
        }
        "notes" => ConsoleCommand::Notes(rest.to_string()),
        "pay" => {
            let (method, _) = next_word(rest, "payment method")?;
            ConsoleCommand::Pay(method.parse().map_err(ApiError::validation)?)
        }
        "clear" => ConsoleCommand::Clear,
        "show" => ConsoleCommand::Show,
        "config" => ConsoleCommand::Config,
        "checkout" => ConsoleCommand::Checkout,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => {
            return Err(ApiError::new(
                ErrorCode::UnknownCommand,
                format!("Unknown command '{}'. Try 'help'.", other),
            ))
        }
    };

    Ok(Some(command))
}

/// Splits the first whitespace-separated word off `text`.
fn next_word<'a>(text: &'a str, field: &str) -> Result<(&'a str, &'a str), ApiError> {
    let text = text.trim_start();
    if text.is_empty() {
        return Err(ApiError::validation(format!("{} is required", field)));
    }

    Ok(match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    })
}

// =============================================================================
// Execution
// =============================================================================

/// What a command produced, serialized as a single-key JSON object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsoleOutput {
    Cart(CartResponse),
    Order(OrderRequest),
    Config(RegisterConfig),
    Help(&'static str),
    Error(ApiError),
}

/// Runs one command against the session.
pub fn execute(
    session: &mut RegisterSession,
    command: ConsoleCommand,
) -> Result<ConsoleOutput, ApiError> {
    let output = match command {
        ConsoleCommand::Add(product) => ConsoleOutput::Cart(cart::add_to_cart(session, product)?),
        ConsoleCommand::Quantity {
            product_id,
            quantity,
        } => ConsoleOutput::Cart(cart::update_cart_item(session, &product_id, quantity)?),
        ConsoleCommand::Increment(id) => {
            ConsoleOutput::Cart(cart::increment_cart_item(session, &id)?)
        }
        ConsoleCommand::Decrement(id) => {
            ConsoleOutput::Cart(cart::decrement_cart_item(session, &id))
        }
        ConsoleCommand::Remove(id) => ConsoleOutput::Cart(cart::remove_from_cart(session, &id)),
        ConsoleCommand::Customer(customer) => {
            ConsoleOutput::Cart(cart::set_customer(session, customer)?)
        }
        ConsoleCommand::Discount(Some(discount)) => {
            ConsoleOutput::Cart(cart::set_discount(session, discount)?)
        }
        ConsoleCommand::Discount(None) => ConsoleOutput::Cart(cart::clear_discount(session)),
        ConsoleCommand::Notes(notes) => ConsoleOutput::Cart(cart::set_notes(session, &notes)?),
        ConsoleCommand::Pay(method) => {
            ConsoleOutput::Cart(cart::set_payment_method(session, method))
        }
        ConsoleCommand::Clear => ConsoleOutput::Cart(cart::clear_cart(session)),
        ConsoleCommand::Show => ConsoleOutput::Cart(cart::get_cart(session)),
        ConsoleCommand::Config => ConsoleOutput::Config(config::get_config(session)),
        ConsoleCommand::Checkout => ConsoleOutput::Order(checkout::checkout(session)?),
        ConsoleCommand::Help | ConsoleCommand::Quit => ConsoleOutput::Help(HELP),
    };

    Ok(output)
}

/// Reads commands until `quit` or end of input, writing one JSON line each.
///
/// Command errors are written as `{"error":...}` and do not stop the loop;
/// only I/O failures end it early.
pub async fn run_console<R, W>(
    session: &mut RegisterSession,
    input: R,
    mut output: W,
) -> Result<(), ApiError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Console ready");
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let result = match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(ConsoleCommand::Quit)) => {
                debug!("Quit requested");
                break;
            }
            Ok(Some(command)) => execute(session, command),
            Err(e) => Err(e),
        };

        let out = result.unwrap_or_else(ConsoleOutput::Error);
        let mut json = serde_json::to_string(&out)
            .map_err(|e| ApiError::internal(format!("Failed to encode output: {}", e)))?;
        json.push('\n');

        output.write_all(json.as_bytes()).await?;
        output.flush().await?;
    }

    info!("Console closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{DiscountSpec, Money};

    fn session() -> RegisterSession {
        RegisterSession::in_memory(RegisterConfig {
            persist_cart: false,
            ..RegisterConfig::default()
        })
    }

    #[test]
    fn test_parse_add() {
        let cmd = parse_line("add P-1 10.50 Masala Chai").unwrap().unwrap();
        assert_eq!(
            cmd,
            ConsoleCommand::Add(CatalogProduct::new(
                "P-1",
                "Masala Chai",
                Money::from_cents(1050)
            ))
        );
    }

    #[test]
    fn test_parse_ignores_blank_and_comments() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# opening float").unwrap(), None);
    }

    #[test]
    fn test_parse_quantity_rejects_fraction() {
        let err = parse_line("qty P-1 2.5").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(
            parse_line("qty P-1 0").unwrap(),
            Some(ConsoleCommand::Quantity {
                product_id: "P-1".to_string(),
                quantity: 0
            })
        );
    }

    #[test]
    fn test_parse_discount_forms() {
        assert_eq!(
            parse_line("discount 10%").unwrap(),
            Some(ConsoleCommand::Discount(Some(DiscountSpec::percentage_bps(1000))))
        );
        assert_eq!(
            parse_line("discount 5").unwrap(),
            Some(ConsoleCommand::Discount(Some(DiscountSpec::fixed(Money::from_cents(500)))))
        );
        assert_eq!(
            parse_line("discount none").unwrap(),
            Some(ConsoleCommand::Discount(None))
        );
        assert!(parse_line("discount 150%").is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_line("frobnicate").unwrap_err().code, ErrorCode::UnknownCommand);
        assert_eq!(parse_line("add").unwrap_err().code, ErrorCode::ValidationError);
        assert_eq!(parse_line("pay bitcoin").unwrap_err().code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_execute_show_after_add() {
        let mut s = session();
        execute(&mut s, parse_line("add P-1 10 Tea").unwrap().unwrap()).unwrap();

        match execute(&mut s, ConsoleCommand::Show).unwrap() {
            ConsoleOutput::Cart(resp) => assert_eq!(resp.totals.total, Money::from_cents(1180)),
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_console_session() {
        let mut s = session();
        let script = "\
add P1 10 Masala Chai
add P1 10 Masala Chai
add P2 15 Samosa
discount 10%
qty P2 1.5
pay upi
checkout
quit
show
";
        let mut out = Vec::new();
        run_console(&mut s, script.as_bytes(), &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let docs: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        // quit stops before "show"
        assert_eq!(docs.len(), 7);
        assert_eq!(docs[3]["cart"]["totals"]["total"], 3717);
        assert_eq!(docs[4]["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(docs[6]["order"]["total"], 3717);
        assert_eq!(docs[6]["order"]["paymentMethod"], "UPI");
        assert!(s.cart().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_price_is_reported_not_fatal() {
        let mut s = session();
        let script = "add P1 92233720368547758.07 Thing\nadd P2 10000000.01 Thing\nshow\n";

        let mut out = Vec::new();
        run_console(&mut s, script.as_bytes(), &mut out).await.unwrap();

        let docs: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0]["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(docs[1]["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(docs[2]["cart"]["totals"]["total"], 0);
    }
}
