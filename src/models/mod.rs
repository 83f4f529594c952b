// ============================================================================
// MODELS
// ============================================================================
//
// One sea-orm entity per table, plus the request/response DTOs (dto) and the
// role enum carried in bearer tokens (roles).
//
// Tables:
//   - users : accounts, credentials and outstanding reset token state
//   - genres, movies : catalogue
//   - auditoriums, seats : venue layout
//   - showtimes : a movie scheduled in an auditorium at a ticket price
//   - reservations, reservation_seats : bookings and their seat assignments
//   - payments : processed payments for a reservation
//
// ============================================================================

use sea_orm::EntityTrait;

pub mod roles;
pub mod dto;
pub mod health;
pub mod users;
pub mod genres;
pub mod movies;
pub mod auditoriums;
pub mod seats;
pub mod showtimes;
pub mod reservations;
pub mod reservation_seats;
pub mod payments;

/// An entity addressed by a single integer id through the generic CRUD helpers.
pub trait Resource: EntityTrait {
    /// Human name used in "<NAME> not found" messages.
    const NAME: &'static str;

    fn id_column() -> Self::Column;
}
