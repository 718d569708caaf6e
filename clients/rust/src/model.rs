use serde::{Deserialize, Serialize};

/// An entry of the account switch keys listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSwitchKey {
    pub account_switch_key: String,
    pub account_name: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_api_field_names() {
        let keys: Vec<AccountSwitchKey> = serde_json::from_value(json!([
            {"accountSwitchKey": "1-ABC", "accountName": "Foo"},
            {"accountSwitchKey": "1-DEF:1-GHI", "accountName": "Bar"},
        ]))
        .unwrap();
        assert_eq!(keys[0].account_switch_key, "1-ABC");
        assert_eq!(keys[1].account_name, "Bar");
    }
}
