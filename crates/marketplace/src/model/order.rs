use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub order_id: i32,
    pub buyer_id: i32,
    pub product_id: Option<i32>,
    pub seller_id: i32,
    pub quantity: i32,
    pub delivery_method: String,
    pub pickup_time: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_fee: i64,
    pub delivery_status: String,
    pub status: String,
    pub notes: Option<String>,
    pub payment_method: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Order {
    pub fn status(&self) -> Result<OrderStatus, String> {
        self.status.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderTracking {
    pub tracking_id: i32,
    pub order_id: i32,
    pub status: String,
    pub time: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderStatusSummary {
    pub status: String,
    pub count: i64,
    pub total_amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    ProcessingPayment,
    PendingAdminConfirmation,
    PickedUp,
    Cancelled,
    Expired,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::ProcessingPayment => "processing_payment",
            Self::PendingAdminConfirmation => "pending_admin_confirmation",
            Self::PickedUp => "picked_up",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }

    /// Statuses an order may be created with.
    pub fn is_initial(&self) -> bool {
        matches!(self, Self::Pending | Self::ProcessingPayment)
    }

    /// Statuses from which the reserved stock can still be handed back.
    pub fn can_cancel(&self) -> bool {
        matches!(self, Self::Pending | Self::ProcessingPayment)
    }

    /// Targets accepted by the status update endpoint.
    pub fn is_assignable(&self) -> bool {
        matches!(
            self,
            Self::Pending | Self::PickedUp | Self::Cancelled | Self::Expired
        )
    }

    pub fn check_transition(&self, target: OrderStatus) -> Result<(), String> {
        if *self == Self::Cancelled {
            return Err("Order status cannot be changed once cancelled".into());
        }

        if !target.is_assignable() {
            return Err(format!("Invalid order status: {target}"));
        }

        if target == Self::Cancelled && !self.can_cancel() {
            return Err("Order cannot be cancelled".into());
        }

        Ok(())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing_payment" => Ok(Self::ProcessingPayment),
            "pending_admin_confirmation" => Ok(Self::PendingAdminConfirmation),
            "picked_up" => Ok(Self::PickedUp),
            "cancelled" => Ok(Self::Cancelled),
            "expired" => Ok(Self::Expired),
            _ => Err(format!("Invalid order status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    OnDelivery,
    Delivered,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::OnDelivery => "on_delivery",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
        }
    }

    /// Whether moving into this status leaves an entry in the tracking log.
    pub fn is_tracked(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "on_delivery" => Ok(Self::OnDelivery),
            "delivered" => Ok(Self::Delivered),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid delivery status: {s}")),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_order(order_id: i32, product_id: i32, quantity: i32, status: OrderStatus) -> Order {
    Order {
        order_id,
        buyer_id: 10,
        product_id: Some(product_id),
        seller_id: 20,
        quantity,
        delivery_method: "pickup".into(),
        pickup_time: None,
        delivery_address: None,
        delivery_fee: 0,
        delivery_status: DeliveryStatus::Pending.to_string(),
        status: status.to_string(),
        notes: None,
        payment_method: None,
        created_at: None,
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_and_processing_payment_can_cancel() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::ProcessingPayment.can_cancel());
        assert!(!OrderStatus::PendingAdminConfirmation.can_cancel());
        assert!(!OrderStatus::PickedUp.can_cancel());
        assert!(!OrderStatus::Cancelled.can_cancel());
        assert!(!OrderStatus::Expired.can_cancel());
    }

    #[test]
    fn status_endpoint_allow_list() {
        assert!(OrderStatus::Pending.check_transition(OrderStatus::PickedUp).is_ok());
        assert!(OrderStatus::Pending.check_transition(OrderStatus::Expired).is_ok());
        assert!(
            OrderStatus::PickedUp
                .check_transition(OrderStatus::ProcessingPayment)
                .is_err()
        );
        assert!(
            OrderStatus::Pending
                .check_transition(OrderStatus::PendingAdminConfirmation)
                .is_err()
        );
    }

    #[test]
    fn cancelled_is_terminal() {
        let err = OrderStatus::Cancelled
            .check_transition(OrderStatus::Pending)
            .unwrap_err();
        assert!(err.contains("cancelled"));
    }

    #[test]
    fn cancelling_through_status_respects_cancel_rule() {
        assert!(OrderStatus::ProcessingPayment.check_transition(OrderStatus::Cancelled).is_ok());
        assert_eq!(
            OrderStatus::PickedUp.check_transition(OrderStatus::Cancelled),
            Err("Order cannot be cancelled".to_string())
        );
    }

    #[test]
    fn statuses_parse_from_their_wire_names() {
        assert_eq!("picked_up".parse(), Ok(OrderStatus::PickedUp));
        assert_eq!("on_delivery".parse(), Ok(DeliveryStatus::OnDelivery));
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert!("lost".parse::<DeliveryStatus>().is_err());
    }

    #[test]
    fn pending_delivery_is_not_tracked() {
        assert!(!DeliveryStatus::Pending.is_tracked());
        assert!(DeliveryStatus::Delivered.is_tracked());
    }
}
