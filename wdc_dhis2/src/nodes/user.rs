use serde::{Deserialize, Serialize};
use wdc_core::connectors::Row;

use crate::consts::LIST_SEPARATOR;

/// A reference to another DHIS2 object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NamedRef {
    /// The referenced object's uid.
    #[serde(default)]
    pub id: Option<String>,
    /// The referenced object's name. Entries without one are left out of
    /// joined cells.
    #[serde(default)]
    pub name: Option<String>,
}

/// The credentials object embedded in a user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCredentials {
    /// When the user last signed in, if ever.
    #[serde(default)]
    pub last_login: Option<String>,
}

/// A user as returned by `api/users.json`.
///
/// Optional fields may be missing or `null`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUserRecord {
    /// The user's uid.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub surname: String,
    /// Usually `firstName surname`.
    pub display_name: String,
    /// Creation timestamp, as sent by the server.
    pub created: String,
    /// Last modification timestamp, as sent by the server.
    pub last_updated: String,
    /// A DHIS2 gender code such as `gender_female`.
    #[serde(default)]
    pub gender: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Free-text job title.
    #[serde(default)]
    pub job_title: Option<String>,
    /// Whether the account is disabled.
    #[serde(default)]
    pub disabled: Option<bool>,
    /// Organisation units the user is assigned to.
    #[serde(default)]
    pub organisation_units: Option<Vec<NamedRef>>,
    /// Roles granted to the user.
    #[serde(default)]
    pub user_roles: Option<Vec<NamedRef>>,
    /// Groups the user belongs to.
    #[serde(default)]
    pub user_groups: Option<Vec<NamedRef>>,
    /// Login details. Older servers nest `username` here too; only `lastLogin` is read.
    #[serde(default)]
    pub user_credentials: Option<UserCredentials>,
}

/// A user flattened into a single row of scalar values.
///
/// Every field is always present. The defaults for optional source fields:
///
/// | field       | source                      | default |
/// |-------------|-----------------------------|---------|
/// | gender      | `gender`                    | `""`    |
/// | email       | `email`                     | `""`    |
/// | phone       | `phoneNumber`               | `""`    |
/// | job_title   | `jobTitle`                  | `""`    |
/// | disabled    | `disabled`                  | `false` |
/// | org_units   | `organisationUnits[].name`  | `""`    |
/// | roles       | `userRoles[].name`          | `""`    |
/// | groups      | `userGroups[].name`         | `""`    |
/// | last_login  | `userCredentials.lastLogin` | `""`    |
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatUserRow {
    /// The user's uid.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub surname: String,
    /// Name shown in DHIS2.
    pub display_name: String,
    /// Gender code, or empty.
    pub gender: String,
    /// Email, or empty.
    pub email: String,
    /// From `phoneNumber`.
    pub phone: String,
    /// Job title, or empty.
    pub job_title: String,
    /// Creation timestamp.
    pub created: String,
    /// Last modification timestamp.
    pub last_updated: String,
    /// `false` unless the server says otherwise.
    pub disabled: bool,
    /// Organisation unit names joined with `; `.
    pub org_units: String,
    /// User role names joined with `; `.
    pub roles: String,
    /// User group names joined with `; `.
    pub groups: String,
    /// From `userCredentials.lastLogin`.
    pub last_login: String,
}

impl From<RawUserRecord> for FlatUserRow {
    fn from(user: RawUserRecord) -> Self {
        FlatUserRow {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            surname: user.surname,
            display_name: user.display_name,
            gender: user.gender.unwrap_or_default(),
            email: user.email.unwrap_or_default(),
            phone: user.phone_number.unwrap_or_default(),
            job_title: user.job_title.unwrap_or_default(),
            created: user.created,
            last_updated: user.last_updated,
            disabled: user.disabled.unwrap_or(false),
            org_units: join_names(user.organisation_units),
            roles: join_names(user.user_roles),
            groups: join_names(user.user_groups),
            last_login: user
                .user_credentials
                .and_then(|c| c.last_login)
                .unwrap_or_default(),
        }
    }
}

impl FlatUserRow {
    /// Convert to a host row keyed by the column ids of
    /// [`users_table`](crate::schema::users_table).
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        let mut put = |k: &str, v: serde_json::Value| {
            row.insert(k.to_owned(), v);
        };
        put("id", self.id.as_str().into());
        put("username", self.username.as_str().into());
        put("firstName", self.first_name.as_str().into());
        put("surname", self.surname.as_str().into());
        put("displayName", self.display_name.as_str().into());
        put("gender", self.gender.as_str().into());
        put("email", self.email.as_str().into());
        put("phone", self.phone.as_str().into());
        put("jobTitle", self.job_title.as_str().into());
        put("created", self.created.as_str().into());
        put("lastUpdated", self.last_updated.as_str().into());
        put("disabled", self.disabled.into());
        put("orgUnits", self.org_units.as_str().into());
        put("roles", self.roles.as_str().into());
        put("groups", self.groups.as_str().into());
        put("lastLogin", self.last_login.as_str().into());
        row
    }
}

/// Join relation names in source order. Unnamed entries are skipped.
fn join_names(refs: Option<Vec<NamedRef>>) -> String {
    refs.unwrap_or_default()
        .into_iter()
        .filter_map(|r| r.name)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn raw(val: serde_json::Value) -> RawUserRecord {
        serde_json::from_value(val).unwrap()
    }

    fn minimal() -> serde_json::Value {
        json!({
            "id": "u1",
            "username": "jdoe",
            "firstName": "Jane",
            "surname": "Doe",
            "displayName": "Jane Doe",
            "created": "2020-01-01",
            "lastUpdated": "2020-01-02",
        })
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let row = FlatUserRow::from(raw(minimal()));
        assert_eq!(
            row,
            FlatUserRow {
                id: "u1".to_owned(),
                username: "jdoe".to_owned(),
                first_name: "Jane".to_owned(),
                surname: "Doe".to_owned(),
                display_name: "Jane Doe".to_owned(),
                created: "2020-01-01".to_owned(),
                last_updated: "2020-01-02".to_owned(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn null_optional_fields_use_defaults() {
        let mut val = minimal();
        for k in [
            "gender",
            "email",
            "phoneNumber",
            "jobTitle",
            "disabled",
            "organisationUnits",
            "userRoles",
            "userGroups",
            "userCredentials",
        ] {
            val[k] = serde_json::Value::Null;
        }
        let row = FlatUserRow::from(raw(val));
        assert_eq!(row.gender, "");
        assert_eq!(row.phone, "");
        assert!(!row.disabled);
        assert_eq!(row.org_units, "");
        assert_eq!(row.last_login, "");
    }

    #[test]
    fn relations_join_in_source_order() {
        let mut val = minimal();
        val["organisationUnits"] = json!([{"id": "a", "name": "A"}, {"id": "b", "name": "B"}]);
        val["userRoles"] = json!([{"name": "Superuser"}]);
        val["userGroups"] = json!([]);
        let row = FlatUserRow::from(raw(val));
        assert_eq!(row.org_units, "A; B");
        assert_eq!(row.roles, "Superuser");
        assert_eq!(row.groups, "");
    }

    #[test]
    fn unnamed_relations_are_skipped() {
        let mut val = minimal();
        val["organisationUnits"] = json!([{"name": "A"}, {}, {"id": "x", "name": null}, {"name": "B"}]);
        val["userGroups"] = json!([{"id": "g1"}]);
        let row = FlatUserRow::from(raw(val));
        assert_eq!(row.org_units, "A; B");
        assert_eq!(row.groups, "");
    }

    #[test]
    fn present_fields_are_copied() {
        let mut val = minimal();
        val["gender"] = json!("gender_female");
        val["email"] = json!("jane@example.org");
        val["phoneNumber"] = json!("+1 555");
        val["jobTitle"] = json!("Nurse");
        val["disabled"] = json!(true);
        val["userCredentials"] = json!({"lastLogin": "2021-03-04T05:06:07.000"});
        let row = FlatUserRow::from(raw(val));
        assert_eq!(row.gender, "gender_female");
        assert_eq!(row.email, "jane@example.org");
        assert_eq!(row.phone, "+1 555");
        assert_eq!(row.job_title, "Nurse");
        assert!(row.disabled);
        assert_eq!(row.last_login, "2021-03-04T05:06:07.000");
    }

    #[test]
    fn row_has_every_column() {
        let row = FlatUserRow::from(raw(minimal())).to_row();
        let schema = crate::schema::users_table();
        let mut keys: Vec<_> = row.keys().map(String::as_str).collect();
        let mut columns = schema.column_ids();
        keys.sort();
        columns.sort();
        assert_eq!(keys, columns);
        assert_eq!(row["disabled"], json!(false));
        assert_eq!(row["orgUnits"], json!(""));
    }
}
