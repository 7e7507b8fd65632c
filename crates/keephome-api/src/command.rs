// ── Typed setting commands ──
//
// The device protocol is a bag of string pairs ("SSID" -> "get",
// "SSID" -> "set" + "newWiFiSSID" -> value). Internally everything is a
// tagged variant; the legacy wire form only exists in `form_pairs()`.

/// A device setting addressable over the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    Ssid,
    WifiMode,
    Password,
}

impl SettingField {
    /// The form key carrying the `get`/`set` verb for this field.
    fn wire_key(self) -> &'static str {
        match self {
            Self::Ssid => "SSID",
            Self::WifiMode => "WiFiMode",
            Self::Password => "password",
        }
    }

    /// The form key carrying the new value on a `set`.
    ///
    /// The casing is inconsistent on purpose — it is what the firmware
    /// parses, and the firmware is not going to change.
    fn wire_value_key(self) -> &'static str {
        match self {
            Self::Ssid => "newWiFiSSID",
            Self::WifiMode => "newWiFimode",
            Self::Password => "newPassword",
        }
    }
}

/// A single read or write against one device setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingCommand {
    Get(SettingField),
    Set(SettingField, String),
}

impl SettingCommand {
    /// Write command for the SSID.
    pub fn set_ssid(ssid: impl Into<String>) -> Self {
        Self::Set(SettingField::Ssid, ssid.into())
    }

    /// Write command for the WiFi password.
    pub fn set_password(password: impl Into<String>) -> Self {
        Self::Set(SettingField::Password, password.into())
    }

    /// Write command for the WiFi mode. `true` maps to `"1"` (access
    /// point on), `false` to `"0"`.
    pub fn set_ap_mode(enabled: bool) -> Self {
        let wire = if enabled { "1" } else { "0" };
        Self::Set(SettingField::WifiMode, wire.to_owned())
    }

    /// Read commands for every settable field, in wire order.
    pub fn get_all() -> Vec<Self> {
        vec![
            Self::Get(SettingField::Ssid),
            Self::Get(SettingField::WifiMode),
            Self::Get(SettingField::Password),
        ]
    }

    /// Serialize to the legacy form pairs the firmware expects.
    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Get(field) => vec![(field.wire_key(), "get".to_owned())],
            Self::Set(field, value) => vec![
                (field.wire_key(), "set".to_owned()),
                (field.wire_value_key(), value.clone()),
            ],
        }
    }
}

/// Flatten a batch of commands into one form-parameter list.
pub(crate) fn encode(commands: &[SettingCommand]) -> Vec<(&'static str, String)> {
    commands.iter().flat_map(SettingCommand::form_pairs).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_encodes_verb_only() {
        let pairs = SettingCommand::Get(SettingField::Ssid).form_pairs();
        assert_eq!(pairs, vec![("SSID", "get".to_owned())]);
    }

    #[test]
    fn set_encodes_verb_and_value() {
        let pairs = SettingCommand::set_ssid("Home2").form_pairs();
        assert_eq!(
            pairs,
            vec![("SSID", "set".to_owned()), ("newWiFiSSID", "Home2".to_owned())]
        );
    }

    #[test]
    fn wifi_mode_uses_numeric_wire_values() {
        assert_eq!(
            SettingCommand::set_ap_mode(true).form_pairs(),
            vec![("WiFiMode", "set".to_owned()), ("newWiFimode", "1".to_owned())]
        );
        assert_eq!(
            SettingCommand::set_ap_mode(false).form_pairs(),
            vec![("WiFiMode", "set".to_owned()), ("newWiFimode", "0".to_owned())]
        );
    }

    #[test]
    fn password_uses_lowercase_wire_key() {
        let pairs = SettingCommand::set_password("12345678").form_pairs();
        assert_eq!(
            pairs,
            vec![
                ("password", "set".to_owned()),
                ("newPassword", "12345678".to_owned())
            ]
        );
    }

    #[test]
    fn batch_flattens_in_order() {
        let params = encode(&SettingCommand::get_all());
        assert_eq!(
            params,
            vec![
                ("SSID", "get".to_owned()),
                ("WiFiMode", "get".to_owned()),
                ("password", "get".to_owned()),
            ]
        );
    }
}
