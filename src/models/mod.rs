pub mod place;
pub mod seat;
pub mod sequence;
pub mod goods;
pub mod reservation;
pub mod view;

pub use place::Place;
pub use seat::{NewSeat, Seat};
pub use sequence::Sequence;
pub use goods::Goods;
pub use reservation::{NewReservation, Reservation};
pub use view::{GoodsSummary, ReservationView, SequenceSummary};
