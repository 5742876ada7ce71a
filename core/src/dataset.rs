//! The in-memory named-table registry.
//!
//! RULE: Only the engine mutates the Dataset, by handing it to one
//! generator at a time. Each generator appends to its own table(s) and
//! never rewrites rows another generator produced.

use crate::{
    abandonment_generator::CartAbandonmentRecord,
    campaign_generator::CampaignRecord,
    customer_generator::CustomerRecord,
    metrics_generator::SystemMetricRecord,
    order_generator::{OrderItemRecord, OrderRecord},
    product_generator::ProductRecord,
    returns_generator::ReturnRecord,
    supplier_generator::SupplierRecord,
    ticket_generator::SupportTicketRecord,
};
use serde::Serialize;

/// Closed enumeration of every table a run can produce.
/// NEVER reorder — downstream consumers key output files on these names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableId {
    Customers,
    Suppliers,
    Products,
    Campaigns,
    Orders,
    OrderItems,
    SupportTickets,
    CartAbandonment,
    Returns,
    SystemMetrics,
}

impl TableId {
    pub const ALL: [TableId; 10] = [
        TableId::Customers,
        TableId::Suppliers,
        TableId::Products,
        TableId::Campaigns,
        TableId::Orders,
        TableId::OrderItems,
        TableId::SupportTickets,
        TableId::CartAbandonment,
        TableId::Returns,
        TableId::SystemMetrics,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TableId::Customers => "customers",
            TableId::Suppliers => "suppliers",
            TableId::Products => "products",
            TableId::Campaigns => "campaigns",
            TableId::Orders => "orders",
            TableId::OrderItems => "order_items",
            TableId::SupportTickets => "support_tickets",
            TableId::CartAbandonment => "cart_abandonment",
            TableId::Returns => "returns",
            TableId::SystemMetrics => "system_metrics",
        }
    }
}

/// All generated tables for one run, strongly typed per table.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Dataset {
    pub customers: Vec<CustomerRecord>,
    pub suppliers: Vec<SupplierRecord>,
    pub products: Vec<ProductRecord>,
    pub campaigns: Vec<CampaignRecord>,
    pub orders: Vec<OrderRecord>,
    pub order_items: Vec<OrderItemRecord>,
    pub support_tickets: Vec<SupportTicketRecord>,
    pub cart_abandonment: Vec<CartAbandonmentRecord>,
    pub returns: Vec<ReturnRecord>,
    pub system_metrics: Vec<SystemMetricRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, table: TableId) -> usize {
        match table {
            TableId::Customers => self.customers.len(),
            TableId::Suppliers => self.suppliers.len(),
            TableId::Products => self.products.len(),
            TableId::Campaigns => self.campaigns.len(),
            TableId::Orders => self.orders.len(),
            TableId::OrderItems => self.order_items.len(),
            TableId::SupportTickets => self.support_tickets.len(),
            TableId::CartAbandonment => self.cart_abandonment.len(),
            TableId::Returns => self.returns.len(),
            TableId::SystemMetrics => self.system_metrics.len(),
        }
    }

    pub fn total_rows(&self) -> usize {
        TableId::ALL.iter().map(|t| self.len(*t)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_rows() == 0
    }
}
