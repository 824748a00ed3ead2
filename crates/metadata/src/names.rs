use percent_encoding::percent_decode_str;

/// Decode upstream percent-encoding in a component name.
///
/// Retrieval tooling percent-encodes characters like `&` in record type
/// names (`M%26D Sales`), while manifests and object definitions carry the
/// same names decoded. All record type identifiers are decoded to one
/// canonical form before they are compared.
#[must_use]
pub fn percent_decode_name(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Compound record type identifier: `<object>.<record type>`.
///
/// Object definitions declare record types by bare name; profiles refer to
/// them qualified by object. The compound form is the registry key.
#[must_use]
pub fn record_type_identifier(object: &str, record_type: &str) -> String {
    format!("{object}.{record_type}")
}
