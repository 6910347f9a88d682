pub mod reservation;

pub use reservation::{CreateReservation, Entity, ReservationError, ReservationResult, ReservationService};
