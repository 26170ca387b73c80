//! # Receipt Commands
//!
//! ```text
//! totals <cart.json>   compute locally, print breakdown
//! create <cart.json>   validate, (optionally) look up DNI, submit
//! list [--newest]      one row per boleta
//! show <ID>            header + detail lines
//! ```

use anyhow::Context;
use boleta_client::checkout;
use boleta_core::form::ReceiptForm;
use boleta_core::format::{display_timestamp, CurrencyFormat};
use boleta_core::totals::RECEIPT_TAX_RATE;
use boleta_core::types::ReceiptRecord;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info};

use crate::cart_file::CartFile;
use crate::state::AppState;

const LABEL_WIDTH: usize = 36;
const AMOUNT_WIDTH: usize = 16;

pub async fn totals(state: &AppState, cart: &Path, json: bool) -> anyhow::Result<()> {
    let form = CartFile::read(cart)?.into_form();
    debug!(items = form.items.len(), "totals command");

    if json {
        println!("{}", serde_json::to_string_pretty(&form.totals())?);
    } else {
        print!("{}", render_totals(&form, &state.currency));
    }
    Ok(())
}

pub async fn create(state: &AppState, cart: &Path, lookup: bool) -> anyhow::Result<()> {
    let mut form = CartFile::read(cart)?.into_form();

    if lookup && form.customer.names.trim().is_empty() {
        let identity = state
            .identity
            .lookup(&form.customer.dni)
            .await
            .context("looking up customer DNI")?;
        if identity.is_none() {
            println!("No data found for DNI {}", form.customer.dni.trim());
        }
        form.apply_identity(identity.as_ref());
    }

    print!("{}", render_totals(&form, &state.currency));

    let created = checkout::submit(&mut form, &state.receipts).await?;
    match created.receipt_id {
        Some(id) => println!("Boleta #{} created", id),
        None => println!("Boleta created"),
    }
    if !created.message.is_empty() {
        info!(message = %created.message, "Backend acknowledged receipt");
    }
    Ok(())
}

pub async fn list(state: &AppState, newest: bool) -> anyhow::Result<()> {
    let receipts = if newest {
        state.receipts.list_newest_first().await?
    } else {
        state.receipts.list().await?
    };

    if receipts.is_empty() {
        println!("No boletas yet");
        return Ok(());
    }

    print!("{}", render_list(&receipts, &state.currency));
    Ok(())
}

pub async fn show(state: &AppState, id: i64) -> anyhow::Result<()> {
    let mut receipt = state.receipts.get(id).await?;
    if receipt.details.is_empty() {
        receipt.details = state.receipts.details(id).await?;
    }
    print!("{}", render_receipt(&receipt, &state.currency));
    Ok(())
}

// =============================================================================
// Rendering
// =============================================================================

fn row(out: &mut String, label: &str, amount: &str) {
    let _ = writeln!(
        out,
        "{:<w$}{:>a$}",
        label,
        amount,
        w = LABEL_WIDTH,
        a = AMOUNT_WIDTH
    );
}

/// Lines and IGV breakdown of a form, as shown before submitting.
pub fn render_totals(form: &ReceiptForm, currency: &CurrencyFormat) -> String {
    let mut out = String::new();

    for item in &form.items {
        let mut label = format!("{} x {}", item.quantity, item.product_name);
        if !item.discount.is_zero() {
            let _ = write!(label, " (-{})", currency.format(item.discount));
        }
        row(&mut out, &label, &currency.format(item.line_total()));
    }

    let totals = form.totals();
    let _ = writeln!(out, "{}", "-".repeat(LABEL_WIDTH + AMOUNT_WIDTH));
    row(&mut out, "Op. gravadas", &currency.format(totals.tax_exclusive_base));
    row(
        &mut out,
        &format!("IGV ({}%)", RECEIPT_TAX_RATE.percentage()),
        &currency.format(totals.tax_amount),
    );
    row(&mut out, "Total", &currency.format(totals.final_total));
    out
}

/// One row per receipt: id, date, customer, document, units, total.
pub fn render_list(receipts: &[ReceiptRecord], currency: &CurrencyFormat) -> String {
    let mut out = String::new();
    for receipt in receipts {
        let _ = writeln!(
            out,
            "#{:<6} {:<17} {:<28} {:<12} {:>4} {:>14}",
            receipt.id,
            display_timestamp(&receipt.created_at),
            receipt.customer_name,
            receipt.customer_document,
            receipt.total_quantity(),
            currency.format(receipt.total)
        );
    }
    out
}

/// Full receipt: header, detail lines, total.
pub fn render_receipt(receipt: &ReceiptRecord, currency: &CurrencyFormat) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Boleta #{}", receipt.id);
    let _ = writeln!(out, "Date:     {}", display_timestamp(&receipt.created_at));
    let _ = writeln!(
        out,
        "Customer: {} ({})",
        receipt.customer_name, receipt.customer_document
    );
    if !receipt.customer_email.is_empty() {
        let _ = writeln!(out, "Email:    {}", receipt.customer_email);
    }
    if let Some(seller) = &receipt.seller {
        let _ = writeln!(out, "Seller:   {} {}", seller.names, seller.surnames);
    }
    let _ = writeln!(out);

    for detail in &receipt.details {
        row(
            &mut out,
            &format!(
                "{} x {} @ {}",
                detail.quantity,
                detail.product,
                currency.format(detail.unit_price)
            ),
            &currency.format(detail.line_subtotal()),
        );
    }
    let _ = writeln!(out, "{}", "-".repeat(LABEL_WIDTH + AMOUNT_WIDTH));
    row(&mut out, "Total", &currency.format(receipt.total));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_file::CartFile;

    fn sample_form() -> ReceiptForm {
        CartFile::parse(
            r#"{
                "customer": { "dni": "12345678" },
                "items": [
                    { "productName": "Cuaderno", "quantity": 2, "unitPrice": "10.00" },
                    { "productName": "Lapicero", "quantity": 1, "unitPrice": "5.50", "discount": "0.50" }
                ]
            }"#,
        )
        .unwrap()
        .into_form()
    }

    fn sample_record() -> ReceiptRecord {
        serde_json::from_value(serde_json::json!({
            "idBoleta": 42,
            "fecha_creacion": "2025-10-16 22:34:34.39801",
            "total": 25.0,
            "detalles": [
                { "producto": "Cuaderno", "precio_unitario": 10.0, "cantidad": 2 },
                { "producto": "Lapicero", "precio_unitario": 5.0, "cantidad": 1, "subtotal": 5.0 }
            ],
            "nombreCliente": "Ana Quispe",
            "documentoCliente": "12345678",
            "emailCliente": "example@gmail.com"
        }))
        .unwrap()
    }

    #[test]
    fn test_render_totals() {
        let text = render_totals(&sample_form(), &CurrencyFormat::pen());
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("2 x Cuaderno"));
        assert!(lines[0].ends_with("S/ 20.00"));
        assert!(lines[1].starts_with("1 x Lapicero (-S/ 0.50)"));
        assert!(lines[1].ends_with("S/ 5.00"));
        assert!(lines[3].starts_with("Op. gravadas") && lines[3].ends_with("S/ 21.19"));
        assert!(lines[4].starts_with("IGV (18%)") && lines[4].ends_with("S/ 3.81"));
        assert!(lines[5].starts_with("Total") && lines[5].ends_with("S/ 25.00"));
    }

    #[test]
    fn test_render_list() {
        let text = render_list(&[sample_record()], &CurrencyFormat::pen());
        assert!(text.starts_with("#42"));
        assert!(text.contains("16/10/2025 10 PM"));
        assert!(text.contains("Ana Quispe"));
        assert!(text.trim_end().ends_with("S/ 25.00"));
    }

    #[test]
    fn test_render_receipt() {
        let text = render_receipt(&sample_record(), &CurrencyFormat::pen());
        assert!(text.starts_with("Boleta #42\n"));
        assert!(text.contains("Customer: Ana Quispe (12345678)"));
        assert!(text.contains("2 x Cuaderno @ S/ 10.00"));
        assert!(!text.contains("Seller:"));
        assert!(text.trim_end().ends_with("S/ 25.00"));
    }

    #[test]
    fn test_render_receipt_with_bad_date() {
        let mut record = sample_record();
        record.created_at = "ayer".into();
        assert!(render_receipt(&record, &CurrencyFormat::pen()).contains("Fecha inválida"));
    }
}
