pub mod store;

pub use store::{
    AlertStore, MaintenanceStore, ReadingStore, ReportStore, SensorStore, StoreError,
    TankStore, ThresholdStore, UserStore,
};
