//! StationStore port - key-row CRUD over the three station tables
//!
//! `userData` and `stationData` always hold exactly one row; updates
//! overwrite it. `waterHistory` is append-only until cleared. There are no
//! transactions across rows.

use async_trait::async_trait;

use crate::domain::{StationData, StoreError, UserData, WaterData};

#[async_trait]
pub trait StationStore: Send + Sync {
    async fn get_user_data(&self) -> Result<UserData, StoreError>;

    async fn update_user_data(&self, user: UserData) -> Result<(), StoreError>;

    async fn get_station_data(&self) -> Result<StationData, StoreError>;

    async fn update_station_data(&self, station: StationData) -> Result<(), StoreError>;

    async fn add_water_history(&self, entry: WaterData) -> Result<(), StoreError>;

    /// All history rows in insertion order.
    async fn get_water_history(&self) -> Result<Vec<WaterData>, StoreError>;

    async fn delete_water_history(&self) -> Result<(), StoreError>;
}
