/// Name of the header carrying the accepted content type.
pub const ACCEPT_HEADER: &str = "Accept";
/// Content type requested from DHIS2.
pub const JSON_CONTENT: &str = "application/json";

/// Path of the users collection, relative to the DHIS2 base URL.
pub const USERS_PATH: &str = "api/users.json";

/// The fields requested for every user. Relations only need their names;
/// ids come along so rows can be traced back to DHIS2 objects.
pub const USER_FIELDS: &str = "id,username,firstName,surname,displayName,gender,email,\
phoneNumber,jobTitle,created,lastUpdated,disabled,organisationUnits[id,name],\
userRoles[id,name],userGroups[id,name],userCredentials[lastLogin]";

/// Table identifier declared to the host.
pub const TABLE_ID: &str = "DHIS2Users";
/// Table name shown by the host.
pub const TABLE_ALIAS: &str = "DHIS2 Users";
/// Display name of a submitted connection.
pub const CONNECTION_NAME: &str = "DHIS2 Users";

/// Separator used when joining relation names into one cell.
pub const LIST_SEPARATOR: &str = "; ";
