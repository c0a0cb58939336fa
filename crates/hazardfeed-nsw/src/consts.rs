//! Constants for the NSW Live Traffic hazard feeds

pub const ATTRIBUTION: &str = "Data provided by Transport for NSW";

pub const URL_AUTHORITY: &str = "http://data.livetraffic.com";
pub const URL_PATH_PREFIX: &str = "/traffic/hazards/";

// Feature property keys
pub const ATTR_TITLE: &str = "displayName";
pub const ATTR_CATEGORY: &str = "mainCategory";
pub const ATTR_TYPE: &str = "incidentKind";
pub const ATTR_DESCRIPTION: &str = "headline";
pub const ATTR_PUB_DATE: &str = "created";
pub const ATTR_UPDATED_DATE: &str = "lastUpdated";
pub const ATTR_ADVICE_A: &str = "adviceA";
pub const ATTR_ADVICE_B: &str = "adviceB";
pub const ATTR_IS_MAJOR: &str = "isMajor";
pub const ATTR_ENDED: &str = "ended";
pub const ATTR_ROADS: &str = "roads";
pub const ATTR_ROAD_MAIN_STREET: &str = "mainStreet";
pub const ATTR_ROAD_SUBURB: &str = "suburb";
