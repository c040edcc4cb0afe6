use std::ops::{Range, RangeInclusive};

use crate::config::ResortConfig;
use crate::devices::bands::band_value;
use crate::sim::types::{ResortSnapshot, SimConfig};

/// Target share of rooms occupied, by half-open hour band.
const OCCUPANCY_TARGETS: [(Range<f64>, f64); 4] = [
    (0.0..6.0, 0.8),
    (6.0..12.0, 0.7),
    (12.0..18.0, 0.6),
    (18.0..22.0, 0.9),
];

/// Occupancy target outside every band in [`OCCUPANCY_TARGETS`] (22:00 to midnight).
const LATE_EVENING_OCCUPANCY: f64 = 0.85;

/// Share of guests in the restaurant: breakfast, then dinner.
const RESTAURANT_ATTENDANCE: [(RangeInclusive<f64>, f64); 2] =
    [(7.0..=10.0, 0.4), (18.0..=22.0, 0.5)];

/// Share of guests in the spa during the afternoon.
const SPA_ATTENDANCE: [(RangeInclusive<f64>, f64); 1] = [(14.0..=18.0, 0.25)];

/// Share of guests passing through the lobby at any hour.
const LOBBY_ATTENDANCE: f64 = 0.1;

/// Cap on the combined shared-area attendance share.
const MAX_SHARED_ATTENDANCE: f64 = 0.8;

/// Share of occupied rooms that are suites, before suite capacity applies.
const SUITE_SHARE: f64 = 0.2;

pub const GUESTS_PER_STANDARD_ROOM: u32 = 2;
pub const GUESTS_PER_SUITE: u32 = 3;

/// Per-step room change is limited to `total_rooms / ROOM_CHANGE_DIVISOR` (at least one).
const ROOM_CHANGE_DIVISOR: u32 = 20;

/// Rooms occupied and customers present in the shared areas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occupancy {
    pub standard_rooms: u32,
    pub suite_rooms: u32,
    pub restaurant_customers: u32,
    pub spa_customers: u32,
    pub lobby_customers: u32,
}

impl Occupancy {
    /// Total rooms occupied.
    pub fn rooms(&self) -> u32 {
        self.standard_rooms.saturating_add(self.suite_rooms)
    }

    /// Guests staying in the occupied rooms.
    pub fn guests(&self) -> u32 {
        self.standard_rooms
            .saturating_mul(GUESTS_PER_STANDARD_ROOM)
            .saturating_add(self.suite_rooms.saturating_mul(GUESTS_PER_SUITE))
    }
}

/// Fraction of guests present in each shared area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attendance {
    pub restaurant: f64,
    pub spa: f64,
    pub lobby: f64,
}

impl Attendance {
    /// Attendance shares at `hour`, scaled down so they never exceed
    /// [`MAX_SHARED_ATTENDANCE`] combined.
    pub fn at_hour(hour: f64) -> Self {
        let restaurant = band_value(&RESTAURANT_ATTENDANCE, hour).unwrap_or(0.0);
        let spa = band_value(&SPA_ATTENDANCE, hour).unwrap_or(0.0);
        let lobby = LOBBY_ATTENDANCE;

        let total = restaurant + spa + lobby;
        if total > MAX_SHARED_ATTENDANCE {
            let scale = MAX_SHARED_ATTENDANCE / total;
            Self {
                restaurant: restaurant * scale,
                spa: spa * scale,
                lobby: lobby * scale,
            }
        } else {
            Self {
                restaurant,
                spa,
                lobby,
            }
        }
    }

    /// Combined share across all areas.
    pub fn total(&self) -> f64 {
        self.restaurant + self.spa + self.lobby
    }
}

/// Resort demand model driven by time-of-day occupancy and guest activity.
///
/// The model itself is immutable; occupancy carried between steps lives in
/// the caller's [`Occupancy`].
///
/// # Examples
///
/// ```
/// use hydro_resort_sim::config::ResortConfig;
/// use hydro_resort_sim::devices::resort::{Occupancy, ResortModel};
/// use hydro_resort_sim::sim::types::SimConfig;
///
/// let model = ResortModel::new(&ResortConfig::default(), &SimConfig::new(15, 1));
/// let mut occupancy = Occupancy::default();
///
/// let snapshot = model.step(0, &mut occupancy);
/// assert_eq!(occupancy.rooms(), 1);
/// assert_eq!(snapshot.demand_kw, 40.5);
/// ```
#[derive(Debug, Clone)]
pub struct ResortModel {
    config: ResortConfig,
    timing: SimConfig,
}

impl ResortModel {
    /// Creates a demand model for the given resort layout and timestep.
    pub fn new(config: &ResortConfig, timing: &SimConfig) -> Self {
        Self {
            config: config.clone(),
            timing: timing.clone(),
        }
    }

    /// Total rooms of both kinds.
    pub fn total_rooms(&self) -> u32 {
        self.config
            .num_standard_rooms
            .saturating_add(self.config.num_suite_rooms)
    }

    /// Target occupancy share at `hour`.
    pub fn target_occupancy(hour: f64) -> f64 {
        band_value(&OCCUPANCY_TARGETS, hour).unwrap_or(LATE_EVENING_OCCUPANCY)
    }

    /// Largest change in occupied rooms allowed in one step.
    pub fn max_room_change(&self) -> u32 {
        (self.total_rooms() / ROOM_CHANGE_DIVISOR).max(1)
    }

    /// Moves `current` occupied rooms toward the target for `hour`, rate limited.
    fn next_occupied_rooms(&self, current: u32, hour: f64) -> u32 {
        let total = self.total_rooms();
        let target = (f64::from(total) * Self::target_occupancy(hour)).floor() as i64;
        let limit = i64::from(self.max_room_change());
        let delta = (target - i64::from(current)).clamp(-limit, limit);
        (i64::from(current) + delta).clamp(0, i64::from(total)) as u32
    }

    /// Splits occupied rooms into `(standard, suites)`.
    fn split_rooms(&self, occupied: u32) -> (u32, u32) {
        if occupied == 0 {
            return (0, 0);
        }
        let suites = ((f64::from(occupied) * SUITE_SHARE).floor() as u32)
            .min(self.config.num_suite_rooms);
        let standard = (occupied - suites).min(self.config.num_standard_rooms);
        (standard, suites)
    }

    /// Advances occupancy for `step` and returns the resulting demand breakdown.
    ///
    /// # Arguments
    ///
    /// * `step` - Simulation step index, used to derive the hour of day
    /// * `occupancy` - Occupancy left by the previous step; updated in place
    pub fn step(&self, step: u64, occupancy: &mut Occupancy) -> ResortSnapshot {
        let cfg = &self.config;
        let hour = self.timing.hour_of_day(step);

        // 1. Bookings and checkouts
        let occupied = self.next_occupied_rooms(occupancy.rooms(), hour);
        let (standard, suites) = self.split_rooms(occupied);
        occupancy.standard_rooms = standard;
        occupancy.suite_rooms = suites;

        // 2. Where the guests are
        let guests = occupancy.guests();
        let attendance = Attendance::at_hour(hour);
        occupancy.restaurant_customers = customers(guests, attendance.restaurant);
        occupancy.spa_customers = customers(guests, attendance.spa);
        occupancy.lobby_customers = customers(guests, attendance.lobby);

        // 3. Electrical demand
        let room_kw = f64::from(standard) * cfg.standard_room_kw
            + f64::from(suites) * cfg.suite_room_kw;
        let restaurant_kw = cfg.restaurant_base_kw
            + f64::from(occupancy.restaurant_customers) * cfg.restaurant_kw_per_customer;
        let spa_kw = cfg.spa_base_kw + f64::from(occupancy.spa_customers) * cfg.spa_kw_per_customer;
        let lobby_kw =
            cfg.lobby_base_kw + f64::from(occupancy.lobby_customers) * cfg.lobby_kw_per_customer;

        ResortSnapshot {
            demand_kw: room_kw + restaurant_kw + spa_kw + lobby_kw,
            room_kw,
            restaurant_kw,
            spa_kw,
            lobby_kw,
            standard_rooms_occupied: standard,
            suite_rooms_occupied: suites,
            restaurant_customers: occupancy.restaurant_customers,
            spa_customers: occupancy.spa_customers,
            lobby_customers: occupancy.lobby_customers,
            total_guests: guests,
            hour,
        }
    }
}

fn customers(guests: u32, share: f64) -> u32 {
    (f64::from(guests) * share).floor() as u32
}
