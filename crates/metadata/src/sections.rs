//! Profile section and value tags shared by the registry builder and the
//! reconciler. Tag spellings follow the metadata wire format exactly.

/// Application visibility entries, keyed by `application`
pub const APPLICATION_VISIBILITIES: &str = "applicationVisibilities";
/// Apex class access entries, keyed by `apexClass`
pub const CLASS_ACCESSES: &str = "classAccesses";
/// Field permission entries, keyed by `field`
pub const FIELD_PERMISSIONS: &str = "fieldPermissions";
/// Layout assignment entries, keyed by `layout` and optionally `recordType`
pub const LAYOUT_ASSIGNMENTS: &str = "layoutAssignments";
/// Object permission entries, keyed by `object`
pub const OBJECT_PERMISSIONS: &str = "objectPermissions";
/// Visualforce page access entries, keyed by `apexPage`
pub const PAGE_ACCESSES: &str = "pageAccesses";
/// Record type visibility entries, keyed by `recordType`
pub const RECORD_TYPE_VISIBILITIES: &str = "recordTypeVisibilities";
/// Tab visibility entries, keyed by `tab`
pub const TAB_VISIBILITIES: &str = "tabVisibilities";
/// User permission entries, keyed by `name`
pub const USER_PERMISSIONS: &str = "userPermissions";

/// Login hour restrictions; removed wholesale, never reconciled
pub const LOGIN_HOURS: &str = "loginHours";
/// Login IP restrictions; removed wholesale, never reconciled
pub const LOGIN_IP_RANGES: &str = "loginIpRanges";

/// Value tag naming the application a visibility entry refers to
pub const APPLICATION: &str = "application";
/// Value tag naming the Apex class an access entry refers to
pub const APEX_CLASS: &str = "apexClass";
/// Value tag naming the Visualforce page an access entry refers to
pub const APEX_PAGE: &str = "apexPage";
/// Value tag naming the field (`Object.Field`) a permission entry refers to
pub const FIELD: &str = "field";
/// Value tag naming a page layout
pub const LAYOUT: &str = "layout";
/// Value tag naming a user permission
pub const NAME: &str = "name";
/// Value tag naming the object a permission entry refers to
pub const OBJECT: &str = "object";
/// Value tag naming a record type (`Object.RecordType`)
pub const RECORD_TYPE: &str = "recordType";
/// Value tag naming the tab a visibility entry refers to
pub const TAB: &str = "tab";
