//! Example building a SOAP request with explicit ordering and typed values.

use chrono::{NaiveDate, Utc};
use ordered_xml::{attrs, node, serialize, KeyConverter, Options, Value};

fn main() {
    // Build the request body
    let request = node! {
        "account_id" => 1042,
        "report_date" => NaiveDate::from_ymd_opt(2024, 1, 5).expect("valid date"),
        "requested_at" => Utc::now(),
        "filters" => node! {
            "status" => vec!["open", "pending"],
            "owner" => Value::Nil,
        },
        "note" => "Totals < 100 & overdue",
    }
    // The service expects this exact element order
    .with_order(["account_id", "filters", "report_date", "requested_at", "note"]);

    let envelope = node! {
        "soap:Envelope" => node! {
            "soap:Header" => node! {},
            "soap:Body" => node! { "get_report" => request },
        },
    }
    .with_attributes(
        "soap:Envelope",
        attrs! {
            "xmlns:soap" => "http://schemas.xmlsoap.org/soap/envelope/",
            "xmlns:xsi" => "http://www.w3.org/2001/XMLSchema-instance",
        },
    );

    let options = Options::new()
        .key_converter(KeyConverter::LowerCamelcase)
        .pretty_print(true);
    let xml = serialize(&envelope, &options).expect("Failed to serialize");
    println!("SOAP request:");
    println!("{}", xml);
    println!();

    // A typo in the order directive is caught before anything is sent
    let broken = node! { "account_id" => 1, "note" => "x" }.with_order(["account_id", "notes"]);
    match serialize(&broken, &Options::default()) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Rejected: {}", e),
    }
}
