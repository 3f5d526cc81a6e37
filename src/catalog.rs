//! Known S.M.A.R.T. attribute ids and their canonical names.
//!
//! Names follow the spelling smartctl prints. Ids outside the catalog still
//! get a stable display name through [`AttributeName::Unknown`].

use std::fmt;

use strum::{AsRefStr, EnumIter, FromRepr};

/// Attribute ids the catalog knows by name. The discriminant is the id.
#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, FromRepr, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Attribute {
    #[strum(serialize = "Raw_Read_Error_Rate")]
    RawReadErrorRate = 1,
    #[strum(serialize = "Throughput_Performance")]
    ThroughputPerformance = 2,
    #[strum(serialize = "Spin_Up_Time")]
    SpinUpTime = 3,
    #[strum(serialize = "Start_Stop_Count")]
    StartStopCount = 4,
    #[strum(serialize = "Reallocated_Sector_Ct")]
    ReallocatedSectorCt = 5,
    #[strum(serialize = "Seek_Error_Rate")]
    SeekErrorRate = 7,
    #[strum(serialize = "Seek_Time_Performance")]
    SeekTimePerformance = 8,
    #[strum(serialize = "Power_On_Hours")]
    PowerOnHours = 9,
    #[strum(serialize = "Spin_Retry_Count")]
    SpinRetryCount = 10,
    #[strum(serialize = "Calibration_Retry_Count")]
    CalibrationRetryCount = 11,
    #[strum(serialize = "Power_Cycle_Count")]
    PowerCycleCount = 12,
    #[strum(serialize = "Unused_Reserved_Block_Count_Total")]
    UnusedReservedBlockCountTotal = 180,
    #[strum(serialize = "Runtime_Bad_Block")]
    RuntimeBadBlock = 183,
    #[strum(serialize = "End-to-End_Error")]
    EndToEndError = 184,
    #[strum(serialize = "Reported_Uncorrect")]
    ReportedUncorrect = 187,
    #[strum(serialize = "Command_Timeout")]
    CommandTimeout = 188,
    #[strum(serialize = "High_Fly_Writes")]
    HighFlyWrites = 189,
    #[strum(serialize = "Airflow_Temperature_Cel")]
    AirflowTemperatureCel = 190,
    #[strum(serialize = "G-Sense_Error_Rate")]
    GSenseErrorRate = 191,
    #[strum(serialize = "Power-Off_Retract_Count")]
    PowerOffRetractCount = 192,
    #[strum(serialize = "Load_Cycle_Count")]
    LoadCycleCount = 193,
    #[strum(serialize = "Temperature_Celsius")]
    TemperatureCelsius = 194,
    #[strum(serialize = "Hardware_ECC_Recovered")]
    HardwareEccRecovered = 195,
    #[strum(serialize = "Reallocated_Event_Count")]
    ReallocatedEventCount = 196,
    #[strum(serialize = "Current_Pending_Sector")]
    CurrentPendingSector = 197,
    #[strum(serialize = "Offline_Uncorrectable")]
    OfflineUncorrectable = 198,
    #[strum(serialize = "UDMA_CRC_Error_Count")]
    UdmaCrcErrorCount = 199,
    #[strum(serialize = "Multi_Zone_Error_Rate")]
    MultiZoneErrorRate = 200,
    #[strum(serialize = "Soft_Read_Error_Rate")]
    SoftReadErrorRate = 201,
    #[strum(serialize = "Load-Unload_Cycle_Count")]
    LoadUnloadCycleCount = 225,
    #[strum(serialize = "Power-Off_Retract_Cycle")]
    PowerOffRetractCycle = 228,
    #[strum(serialize = "Head_Flying_Hours")]
    HeadFlyingHours = 240,
    #[strum(serialize = "Total_LBAs_Written")]
    TotalLbasWritten = 241,
    #[strum(serialize = "Total_LBAs_Read")]
    TotalLbasRead = 242,
}

impl Attribute {
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Display name of an attribute id, known or not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeName {
    Known(Attribute),
    Unknown(u8),
}

impl AttributeName {
    /// Resolve an id against the catalog. Never fails.
    pub fn resolve(id: u8) -> Self {
        match Attribute::from_repr(id) {
            Some(attr) => AttributeName::Known(attr),
            None => AttributeName::Unknown(id),
        }
    }

    pub fn id(&self) -> u8 {
        match self {
            AttributeName::Known(attr) => attr.id(),
            AttributeName::Unknown(id) => *id,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, AttributeName::Known(_))
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeName::Known(attr) => f.write_str(attr.as_ref()),
            AttributeName::Unknown(id) => write!(f, "Unknown_HDD_Attribute_{}", id),
        }
    }
}
