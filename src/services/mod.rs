pub mod crud;
pub mod mail_service;
pub mod account_service;
pub mod genre_service;
pub mod movie_service;
pub mod auditorium_service;
pub mod seat_service;
pub mod showtime_service;
pub mod reservation_service;
pub mod payment_service;
pub mod password_reset_service;
pub mod ticket_service;
