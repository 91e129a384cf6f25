//! Build-time configuration for the ESP32-S3 coordinate beacon

/// LED pin
pub mod led {
    pub const PIN: u8 = 48;
}

/// Serial configuration
pub mod serial {
    pub const BAUD_RATE: u32 = 115200;
    /// Maximum length of a single line written back to the operator
    pub const TX_LINE_SIZE: usize = 96;
}

/// Coordinate input grammar
pub mod coordinate {
    /// Characters in `DD°MM'SS.S"N/S, DDD°MM'SS.S"E/W`
    pub const MAX_LEN: usize = 27;

    /// Degree sign as a single Latin-1 byte
    pub const DEGREE_SIGN: u8 = 0xB0;

    /// Lead byte of the UTF-8 encoding of the degree sign (0xC2 0xB0)
    pub const UTF8_DEGREE_LEAD: u8 = 0xC2;

    /// Coordinate printed in the operator guidance
    pub const EXAMPLE: &str = "59°24'40.5\"N, 24°44'31.3\"E";

    /// Format printed in the operator guidance
    pub const FORMAT: &str = "DD°MM'SS.S\"N/S, DDD°MM'SS.S\"E/W";
}

/// Beacon identity, fixed at build time
pub mod beacon {
    /// Name carried in the scan response
    pub const DEVICE_NAME: &str = "GeoBeacon";

    /// Nordic Semiconductor ASA
    pub const COMPANY_IDENTIFIER: u16 = 0x0059;

    /// 0x02 refers to a beacon
    pub const DEVICE_TYPE: u8 = 0x02;

    /// Length of the manufacturer specific data after the length byte
    pub const ADV_DATA_LENGTH: u8 = 0x15;

    pub const UUID: [u8; 16] = [
        0x01, 0x12, 0x23, 0x34, 0x45, 0x56, 0x67, 0x78, 0x89, 0x9a, 0xab, 0xbc, 0xcd, 0xde, 0xef,
        0xf0,
    ];

    pub const MAJOR: u16 = 0x0102;
    pub const MINOR: u16 = 0x0304;

    /// Measured RSSI at 1 m, in dBm (0xC3)
    pub const MEASURED_RSSI: i8 = -61;

    /// Size of the rendered beacon information block
    pub const INFO_LENGTH: usize = 0x17;
}

/// Advertising constants
pub mod advertising {
    /// Legacy advertising PDU payload capacity
    pub const PDU_CAPACITY: usize = 31;

    /// Coordinate bytes carried by the primary advertising record
    pub const PRIMARY_FRAGMENT_LEN: usize = 24;

    /// Advertising interval
    pub const INTERVAL_MS: u32 = 100;

    /// Advertising interval unit, in microseconds
    pub const INTERVAL_UNIT_US: u32 = 625;
}
