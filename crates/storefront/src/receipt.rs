//! Plain-text order receipts.

use technova_core::format_clp;

use crate::models::Order;

/// Date format used on receipts (day first, local convention).
pub const RECEIPT_DATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Render a receipt for a placed order.
///
/// ```text
/// Order ORD-1700000000000
/// Date: 14-11-2023 22:13:20
/// Customer: Ana Soto <ana@gmail.com>
///   2x Martillo de uña 16oz @ $15.990 = $31.980
/// Total: $31.980
/// ```
#[must_use]
pub fn render_receipt(order: &Order) -> String {
    let mut out = vec![
        format!("Order {}", order.id()),
        format!("Date: {}", order.created_at().format(RECEIPT_DATE_FORMAT)),
        format!(
            "Customer: {} <{}>",
            order.customer_name(),
            order.customer_email()
        ),
    ];

    out.extend(order.lines().iter().map(|line| {
        format!(
            "  {}x {} @ {} = {}",
            line.quantity,
            line.name,
            format_clp(line.unit_price),
            format_clp(line.subtotal())
        )
    }));

    out.push(format!("Total: {}", format_clp(order.total())));
    out.join("\n")
}
