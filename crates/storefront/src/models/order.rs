//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use technova_core::{Email, OrderId};

use super::cart::CartLine;

/// A placed order.
///
/// Orders are immutable: fields are private and only checkout constructs
/// them. The total is computed from the lines at creation and frozen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    created_at: DateTime<Utc>,
    customer_email: Email,
    customer_name: String,
    lines: Vec<CartLine>,
    total: u64,
}

impl Order {
    pub(crate) fn new(
        id: OrderId,
        created_at: DateTime<Utc>,
        customer_email: Email,
        customer_name: String,
        lines: Vec<CartLine>,
    ) -> Self {
        let total = lines
            .iter()
            .fold(0_u64, |acc, line| acc.saturating_add(line.subtotal()));
        Self {
            id,
            created_at,
            customer_email,
            customer_name,
            lines,
            total,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn customer_email(&self) -> &Email {
        &self.customer_email
    }

    /// Account display name, or the email when no account matched.
    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }
}

/// One stored log entry.
///
/// Entries that no longer decode as an [`Order`] are kept as raw JSON and
/// written back unchanged, so appending never drops history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum LogEntry {
    Order(Order),
    Unreadable(serde_json::Value),
}

/// The append-only order log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderLog {
    entries: Vec<LogEntry>,
}

impl OrderLog {
    /// Readable orders, oldest first.
    pub fn orders(&self) -> impl DoubleEndedIterator<Item = &Order> {
        self.entries.iter().filter_map(|entry| match entry {
            LogEntry::Order(order) => Some(order),
            LogEntry::Unreadable(_) => None,
        })
    }

    /// Most recent readable order.
    #[must_use]
    pub fn last(&self) -> Option<&Order> {
        self.orders().next_back()
    }

    /// Number of readable orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders().next().is_none()
    }

    /// Number of stored entries that are not valid orders.
    #[must_use]
    pub fn unreadable(&self) -> usize {
        self.entries.len() - self.len()
    }

    /// Orders placed by `email` (case-insensitive), oldest first.
    pub fn for_customer<'a>(&'a self, email: &'a Email) -> impl Iterator<Item = &'a Order> + 'a {
        self.orders()
            .filter(move |o| o.customer_email.matches(email.as_str()))
    }

    pub(crate) fn append(&mut self, order: Order) {
        self.entries.push(LogEntry::Order(order));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use technova_core::ProductId;

    use super::*;

    fn line(id: &str, price: u64, qty: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            name: id.to_string(),
            unit_price: price,
            quantity: qty,
        }
    }

    fn order(id: &str, email: &str) -> Order {
        Order::new(
            OrderId::new(id),
            Utc.timestamp_millis_opt(0).unwrap(),
            Email::parse(email).unwrap(),
            email.to_string(),
            vec![line("P001", 15_990, 2), line("P002", 1_000, 1)],
        )
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        assert_eq!(order("ORD-1", "a@gmail.com").total(), 32_980);
    }

    #[test]
    fn test_for_customer_ignores_case() {
        let mut log = OrderLog::default();
        log.append(order("ORD-1", "Cliente@gmail.com"));
        log.append(order("ORD-2", "otro@gmail.com"));
        log.append(order("ORD-3", "cliente@GMAIL.com"));

        let email = Email::parse("cliente@gmail.com").unwrap();
        let ids: Vec<&str> = log.for_customer(&email).map(|o| o.id().as_str()).collect();
        assert_eq!(ids, ["ORD-1", "ORD-3"]);
        assert_eq!(log.last().unwrap().id().as_str(), "ORD-3");
    }

    #[test]
    fn test_unreadable_entries_survive_append() {
        let stored = serde_json::json!([
            order("ORD-1", "ana@gmail.com"),
            {"id": "ORD-2", "total": "mucho"},
        ]);
        let mut log: OrderLog = serde_json::from_value(stored).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.unreadable(), 1);
        assert_eq!(log.last().unwrap().id().as_str(), "ORD-1");

        log.append(order("ORD-3", "ana@gmail.com"));
        let written = serde_json::to_value(&log).unwrap();
        let ids: Vec<&str> = written
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|entry| entry.get("id").and_then(serde_json::Value::as_str))
            .collect();
        assert_eq!(ids, ["ORD-1", "ORD-2", "ORD-3"]);
        assert_eq!(
            written.get(1).and_then(|e| e.get("total")),
            Some(&serde_json::json!("mucho"))
        );
    }
}
