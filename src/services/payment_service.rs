use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::dto::PaymentRequest;
use crate::models::payments::{self, PAYMENT_SUCCESS};
use crate::models::reservations::{self, ReservationStatus};
use crate::services::crud;

pub struct PaymentService;

impl PaymentService {
    /// Records a successful payment, then marks the reservation as Paid.
    ///
    /// The status update is a separate write: when it fails the payment
    /// stands and the failure is only logged.
    pub async fn process(
        db: &DatabaseConnection,
        reservation_id: i32,
        body: PaymentRequest,
    ) -> Result<payments::Model, AppError> {
        crud::validate_request(&body)?;
        let amount = numeric_amount(body.amount)?;

        crud::find_by_id::<reservations::Entity, _>(db, reservation_id).await?;

        let payment_reference = body
            .payment_reference
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let payment = payments::ActiveModel {
            reservation_id: Set(reservation_id),
            user_id: Set(body.user_id),
            amount: Set(amount),
            payment_method: Set(body.payment_method),
            payment_status: Set(PAYMENT_SUCCESS.to_string()),
            payment_date: Set(Utc::now().naive_utc()),
            transaction_id: Set(body.transaction_id),
            payment_reference: Set(payment_reference),
            payment_gateway: Set(body.payment_gateway),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(
            payment_id = payment.payment_id,
            reservation_id,
            amount = %payment.amount,
            "payment recorded"
        );

        let paid = reservations::ActiveModel {
            status: Set(ReservationStatus::Paid),
            ..Default::default()
        };
        if let Err(e) = crud::update_by_id::<reservations::Entity, _, _>(db, reservation_id, paid).await {
            tracing::error!(
                reservation_id,
                payment_id = payment.payment_id,
                error = %e,
                "payment recorded but reservation status was not updated"
            );
        }

        Ok(payment)
    }
}

fn numeric_amount(value: f64) -> Result<Decimal, AppError> {
    Decimal::from_f64(value)
        .filter(|_| value.is_finite())
        .map(|d| d.round_dp(2))
        .ok_or_else(|| AppError::Validation("Amount must be a number".to_string()))
}
