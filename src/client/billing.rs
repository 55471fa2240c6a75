//! Billing service operations

use serde_json::json;

use super::{Fault, Operation, ServiceClient, ServiceKey};
use crate::models::{Bill, BillInput, BillUpdate, BillingStatistics, MonthlyRevenue};

const BILLS: &str = r#"
query Bills {
  bills { id reservationId totalAmount paymentStatus generatedAt }
}"#;

const BILLING_STATISTICS: &str = r#"
query BillingStatistics {
  billingStatistics { totalBills pendingPayments paidBills totalRevenue }
}"#;

const MONTHLY_REVENUE: &str = r#"
query MonthlyRevenue {
  monthlyRevenue { month revenue }
}"#;

const CREATE_BILL: &str = r#"
mutation CreateBill($billData: BillInput!) {
  createBill(billData: $billData) { id reservationId totalAmount paymentStatus generatedAt }
}"#;

const UPDATE_BILL: &str = r#"
mutation UpdateBill($id: Int!, $billData: BillUpdateInput!) {
  updateBill(id: $id, billData: $billData) { id reservationId totalAmount paymentStatus generatedAt }
}"#;

const DELETE_BILL: &str = r#"
mutation DeleteBill($id: Int!) {
  deleteBill(id: $id)
}"#;

impl ServiceClient {
    pub async fn bills(&self) -> Result<Vec<Bill>, Fault> {
        let op = Operation::new("Bills", "bills", BILLS);
        self.request(ServiceKey::Billing, &op).await
    }

    pub async fn billing_statistics(&self) -> Result<BillingStatistics, Fault> {
        let op = Operation::new("BillingStatistics", "billingStatistics", BILLING_STATISTICS);
        self.request(ServiceKey::Billing, &op).await
    }

    pub async fn monthly_revenue(&self) -> Result<Vec<MonthlyRevenue>, Fault> {
        let op = Operation::new("MonthlyRevenue", "monthlyRevenue", MONTHLY_REVENUE);
        self.request(ServiceKey::Billing, &op).await
    }

    pub async fn create_bill(&self, input: &BillInput) -> Result<Bill, Fault> {
        let op = Operation::new("CreateBill", "createBill", CREATE_BILL).var("billData", json!(input));
        self.request(ServiceKey::Billing, &op).await
    }

    /// Typically used to move a bill between payment states
    pub async fn update_bill(&self, id: i64, update: &BillUpdate) -> Result<Option<Bill>, Fault> {
        let op = Operation::new("UpdateBill", "updateBill", UPDATE_BILL)
            .var("id", id)
            .var("billData", json!(update));
        self.request(ServiceKey::Billing, &op).await
    }

    pub async fn delete_bill(&self, id: i64) -> Result<bool, Fault> {
        let op = Operation::new("DeleteBill", "deleteBill", DELETE_BILL).var("id", id);
        self.request(ServiceKey::Billing, &op).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::ScriptedTransport;
    use super::*;
    use crate::models::PaymentStatus;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_mark_paid_sends_only_status() {
        let transport = ScriptedTransport::new(|service, _| {
            assert_eq!(service, ServiceKey::Billing);
            Ok(json!({"updateBill": {
                "id": 4,
                "reservationId": 12,
                "totalAmount": 450.0,
                "paymentStatus": "paid",
                "generatedAt": "2024-01-03T09:15:00"
            }}))
        });
        let client = ServiceClient::new(Arc::new(transport.clone()));

        let bill = client
            .update_bill(4, &BillUpdate::payment_status(PaymentStatus::Paid))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(bill.payment_status, PaymentStatus::Paid);

        let (_, op) = &transport.calls()[0];
        assert_eq!(op.variable("billData"), Some(&json!({"paymentStatus": "paid"})));
    }

    #[tokio::test]
    async fn test_monthly_revenue_series() {
        let transport = ScriptedTransport::new(|_, _| {
            Ok(json!({"monthlyRevenue": [
                {"month": "Jan", "revenue": 12500.0},
                {"month": "Feb", "revenue": 19200}
            ]}))
        });
        let client = ServiceClient::new(Arc::new(transport));

        let series = client.monthly_revenue().await.unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].revenue, 19200.0);
    }
}
