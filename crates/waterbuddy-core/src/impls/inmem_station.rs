//! InMemoryStationStore - ステーション DB のインメモリ版
//!
//! Opening a fresh store seeds one default row in `userData` and
//! `stationData`, the same as the on-disk store does on first start.
//!
//! # 永続化について
//! Durable storage is external to this crate. On the station the three
//! tables live in an on-disk SQLite database owned by another process; this
//! store only stands in for it behind the [`StationStore`] port and loses
//! everything when dropped.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{StationData, StoreError, UserData, WaterData};
use crate::ports::StationStore;

#[derive(Debug, Default)]
struct Tables {
    user_data: Option<UserData>,
    station_data: Option<StationData>,
    water_history: Vec<WaterData>,
}

pub struct InMemoryStationStore {
    tables: Mutex<Tables>,
}

impl InMemoryStationStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables {
                user_data: Some(UserData::default()),
                station_data: Some(StationData::default()),
                water_history: Vec::new(),
            }),
        }
    }

    /// A store with no rows at all; reads of the single-row tables fail.
    pub fn empty() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
        }
    }
}

impl Default for InMemoryStationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StationStore for InMemoryStationStore {
    async fn get_user_data(&self) -> Result<UserData, StoreError> {
        let tables = self.tables.lock().await;
        tables
            .user_data
            .clone()
            .ok_or(StoreError::MissingRow("userData"))
    }

    async fn update_user_data(&self, user: UserData) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        let row = tables
            .user_data
            .as_mut()
            .ok_or(StoreError::MissingRow("userData"))?;
        *row = user;
        Ok(())
    }

    async fn get_station_data(&self) -> Result<StationData, StoreError> {
        let tables = self.tables.lock().await;
        tables
            .station_data
            .clone()
            .ok_or(StoreError::MissingRow("stationData"))
    }

    async fn update_station_data(&self, station: StationData) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        let row = tables
            .station_data
            .as_mut()
            .ok_or(StoreError::MissingRow("stationData"))?;
        *row = station;
        Ok(())
    }

    async fn add_water_history(&self, entry: WaterData) -> Result<(), StoreError> {
        self.tables.lock().await.water_history.push(entry);
        Ok(())
    }

    async fn get_water_history(&self) -> Result<Vec<WaterData>, StoreError> {
        Ok(self.tables.lock().await.water_history.clone())
    }

    async fn delete_water_history(&self) -> Result<(), StoreError> {
        self.tables.lock().await.water_history.clear();
        Ok(())
    }
}
