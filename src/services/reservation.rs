//! reservation.rs
//!
//! Reservation coordinator: joins reservations with their showing, goods and
//! seat for reads, and books seats inside a single unit of work.
//!
//! Double booking is ruled out twice. The coordinator checks for an existing
//! reservation before inserting, and the store rejects a second reservation
//! for the same `(sequence_id, seat_id)` pair. The second guard is the one
//! that holds under concurrent callers; its violation is reported as
//! [`ReservationError::AlreadyReserved`] exactly like the pre-check.

use std::fmt;

use tracing::{debug, info};

use crate::models::{NewReservation, NewSeat, Reservation, ReservationView};
use crate::repository::{StoreError, Stores};

/// Kind of row a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Reservation,
    Sequence,
    Goods,
    Seat,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Reservation => "reservation",
            Entity::Sequence => "sequence",
            Entity::Goods => "goods",
            Entity::Seat => "seat",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i32 },
    #[error("seat already reserved")]
    AlreadyReserved { sequence_id: i32, seat_id: i32 },
    /// A stored row points at something that no longer exists.
    #[error("integrity violation: {0}")]
    Integrity(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ReservationResult<T> = Result<T, ReservationError>;

/// Input of [`ReservationService::create_reservation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateReservation {
    pub user_id: i32,
    pub sequence_id: i32,
    pub seat_row: i32,
    pub seat_column: i32,
    /// Recorded on a newly created seat; not used to look seats up.
    pub place_id: i32,
}

#[derive(Clone)]
pub struct ReservationService {
    stores: Stores,
}

impl ReservationService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Reservations of `user_id` in store order. Assembly runs one
    /// reservation at a time and the first unresolvable reference fails the
    /// whole call.
    pub async fn list_reservations(&self, user_id: i32) -> ReservationResult<Vec<ReservationView>> {
        let reservations = self.stores.reservations.find_all_by_user_id(user_id).await?;
        debug!("Assembling {} reservations for user {}", reservations.len(), user_id);

        let mut views = Vec::with_capacity(reservations.len());
        for reservation in &reservations {
            views.push(self.assemble(reservation).await?);
        }
        Ok(views)
    }

    pub async fn get_reservation(&self, id: i32) -> ReservationResult<ReservationView> {
        let reservation = self
            .stores
            .reservations
            .find_by_id(id)
            .await?
            .ok_or(ReservationError::NotFound { entity: Entity::Reservation, id })?;

        self.assemble(&reservation).await
    }

    /// Removes the reservation. An unknown id is not an error.
    pub async fn cancel_reservation(&self, id: i32) -> ReservationResult<()> {
        self.stores.reservations.delete_by_id(id).await?;
        info!("Reservation {} cancelled", id);
        Ok(())
    }

    pub async fn create_reservation(&self, request: CreateReservation) -> ReservationResult<()> {
        self.reserve_seat(request).await.map(|_| ())
    }

    /// Books the seat at `(seat_row, seat_column)` for the showing, creating
    /// the seat on first use, and returns the new reservation.
    pub async fn reserve_seat(&self, request: CreateReservation) -> ReservationResult<Reservation> {
        let mut tx = self.stores.unit_of_work.begin().await?;

        let seat = match tx
            .find_seat_by_row_and_col(request.seat_row, request.seat_column)
            .await?
        {
            Some(seat) => {
                let taken = tx
                    .find_reservation_by_sequence_and_seat(request.sequence_id, seat.id)
                    .await?;
                if taken.is_some() {
                    return Err(ReservationError::AlreadyReserved {
                        sequence_id: request.sequence_id,
                        seat_id: seat.id,
                    });
                }
                seat
            }
            None => {
                tx.insert_seat(NewSeat {
                    place_id: request.place_id,
                    seat_row: request.seat_row,
                    seat_col: request.seat_column,
                })
                .await?
            }
        };

        let reservation = tx
            .insert_reservation(NewReservation {
                user_id: request.user_id,
                sequence_id: request.sequence_id,
                seat_id: seat.id,
            })
            .await
            .map_err(|err| match err {
                StoreError::UniqueViolation(_) => ReservationError::AlreadyReserved {
                    sequence_id: request.sequence_id,
                    seat_id: seat.id,
                },
                other => ReservationError::Store(other),
            })?;

        tx.commit().await?;

        info!(
            "Reservation {} created: user {} sequence {} seat {} ({}, {})",
            reservation.id,
            reservation.user_id,
            reservation.sequence_id,
            seat.id,
            seat.seat_row,
            seat.seat_col
        );
        Ok(reservation)
    }

    async fn assemble(&self, reservation: &Reservation) -> ReservationResult<ReservationView> {
        let sequence = self
            .stores
            .sequences
            .find_by_id(reservation.sequence_id)
            .await?
            .ok_or_else(|| {
                ReservationError::Integrity(format!(
                    "reservation {} references missing sequence {}",
                    reservation.id, reservation.sequence_id
                ))
            })?;

        let goods = self
            .stores
            .goods
            .find_by_id(sequence.goods_id)
            .await?
            .ok_or(ReservationError::NotFound { entity: Entity::Goods, id: sequence.goods_id })?;

        let seat = self
            .stores
            .seats
            .find_by_id(reservation.seat_id)
            .await?
            .ok_or(ReservationError::NotFound { entity: Entity::Seat, id: reservation.seat_id })?;

        Ok(ReservationView::assemble(reservation, &sequence, &goods, &seat))
    }
}
