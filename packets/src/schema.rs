//! Static field schemas for every packet type.
//!
//! `required` keys must be present with a non-null value. `allowed` keys are
//! optional. `not_required_in_reply` lists required keys the AMIE service
//! fills in from the preceding packet of the transaction, so a site replying
//! to that packet does not have to repeat them.

use crate::kind::{ExpectedReply, PacketType};

/// Keys a packet type requires and permits, plus the replies it expects.
#[derive(Debug)]
pub struct PacketSchema {
    pub required: &'static [&'static str],
    pub allowed: &'static [&'static str],
    pub not_required_in_reply: &'static [&'static str],
    pub expected_reply: &'static [ExpectedReply],
}

impl PacketSchema {
    /// `true` when `key` is required or allowed.
    #[must_use]
    pub fn is_permitted(&self, key: &str) -> bool {
        self.required.contains(&key) || self.allowed.contains(&key)
    }

    /// `true` when `key` must be present, taking reply waivers into account.
    #[must_use]
    pub fn is_required(&self, key: &str, is_reply: bool) -> bool {
        self.required.contains(&key) && !(is_reply && self.not_required_in_reply.contains(&key))
    }
}

const ITC: &[ExpectedReply] = &[ExpectedReply::of(PacketType::InformTransactionComplete)];

// =============================================================================
// INFORM
// =============================================================================

static INFORM_TRANSACTION_COMPLETE: PacketSchema = PacketSchema {
    required: &["DetailCode", "Message", "StatusCode"],
    allowed: &[],
    not_required_in_reply: &[],
    expected_reply: &[],
};

// =============================================================================
// ACCOUNT
// =============================================================================

const USER_OPTIONAL: &[&str] = &[
    "AcademicDegree",
    "AllocatedResource",
    "NsfStatusCode",
    "ProjectID",
    "RoleList",
    "UserBusinessPhoneComment",
    "UserBusinessPhoneExtension",
    "UserBusinessPhoneNumber",
    "UserCitizenshipList",
    "UserCity",
    "UserDepartment",
    "UserDnList",
    "UserFax",
    "UserHomePhoneComment",
    "UserHomePhoneExtension",
    "UserHomePhoneNumber",
    "UserMiddleName",
    "UserPersonID",
    "UserRemoteSiteLogin",
    "UserRequestedLoginList",
    "UserState",
    "UserStreetAddress",
    "UserStreetAddress2",
    "UserTitle",
    "UserZip",
];

const ACCOUNT_CREATE_CARRIED: &[&str] = &[
    "GrantNumber",
    "ResourceList",
    "UserCountry",
    "UserEmail",
    "UserFirstName",
    "UserGlobalID",
    "UserLastName",
    "UserOrgCode",
    "UserOrganization",
];

static REQUEST_ACCOUNT_CREATE: PacketSchema = PacketSchema {
    required: ACCOUNT_CREATE_CARRIED,
    allowed: USER_OPTIONAL,
    not_required_in_reply: &[],
    expected_reply: &[ExpectedReply::of(PacketType::NotifyAccountCreate)],
};

static NOTIFY_ACCOUNT_CREATE: PacketSchema = PacketSchema {
    required: &[
        "GrantNumber",
        "ProjectID",
        "ResourceList",
        "UserCountry",
        "UserEmail",
        "UserFirstName",
        "UserGlobalID",
        "UserLastName",
        "UserOrgCode",
        "UserOrganization",
        "UserPersonID",
        "UserRemoteSiteLogin",
    ],
    allowed: &[
        "AcademicDegree",
        "AllocatedResource",
        "NsfStatusCode",
        "RoleList",
        "UserBusinessPhoneComment",
        "UserBusinessPhoneExtension",
        "UserBusinessPhoneNumber",
        "UserCitizenshipList",
        "UserCity",
        "UserDepartment",
        "UserDnList",
        "UserFax",
        "UserHomePhoneComment",
        "UserHomePhoneExtension",
        "UserHomePhoneNumber",
        "UserMiddleName",
        "UserState",
        "UserStreetAddress",
        "UserStreetAddress2",
        "UserTitle",
        "UserZip",
    ],
    not_required_in_reply: ACCOUNT_CREATE_CARRIED,
    expected_reply: &[ExpectedReply::of(PacketType::DataAccountCreate)],
};

static DATA_ACCOUNT_CREATE: PacketSchema = PacketSchema {
    required: &["PersonID", "ProjectID"],
    allowed: &["DnList"],
    not_required_in_reply: &[],
    expected_reply: ITC,
};

const ACCOUNT_STATE_KEYS: &[&str] = &["PersonID", "ProjectID", "ResourceList"];

static REQUEST_ACCOUNT_INACTIVATE: PacketSchema = PacketSchema {
    required: ACCOUNT_STATE_KEYS,
    allowed: &["Comment"],
    not_required_in_reply: &[],
    expected_reply: &[ExpectedReply::of(PacketType::NotifyAccountInactivate)],
};

static NOTIFY_ACCOUNT_INACTIVATE: PacketSchema = PacketSchema {
    required: ACCOUNT_STATE_KEYS,
    allowed: &["Comment"],
    not_required_in_reply: ACCOUNT_STATE_KEYS,
    expected_reply: ITC,
};

static REQUEST_ACCOUNT_REACTIVATE: PacketSchema = PacketSchema {
    required: ACCOUNT_STATE_KEYS,
    allowed: &["Comment"],
    not_required_in_reply: &[],
    expected_reply: &[ExpectedReply::of(PacketType::NotifyAccountReactivate)],
};

static NOTIFY_ACCOUNT_REACTIVATE: PacketSchema = PacketSchema {
    required: ACCOUNT_STATE_KEYS,
    allowed: &["Comment"],
    not_required_in_reply: ACCOUNT_STATE_KEYS,
    expected_reply: ITC,
};

// =============================================================================
// PROJECT
// =============================================================================

const PROJECT_CREATE_CARRIED: &[&str] = &[
    "AllocationType",
    "EndDate",
    "GrantNumber",
    "PfosNumber",
    "PiFirstName",
    "PiLastName",
    "PiOrgCode",
    "PiOrganization",
    "ResourceList",
    "ServiceUnitsAllocated",
    "StartDate",
];

const PI_OPTIONAL: &[&str] = &[
    "Abstract",
    "BoardType",
    "GrantType",
    "PiBusinessPhoneComment",
    "PiBusinessPhoneExtension",
    "PiBusinessPhoneNumber",
    "PiCity",
    "PiCountry",
    "PiDepartment",
    "PiDnList",
    "PiEmail",
    "PiFax",
    "PiGlobalID",
    "PiHomePhoneComment",
    "PiHomePhoneExtension",
    "PiHomePhoneNumber",
    "PiMiddleName",
    "PiNsfStatusCode",
    "PiRequestedLoginList",
    "PiState",
    "PiStreetAddress",
    "PiStreetAddress2",
    "PiTitle",
    "PiZip",
    "ProjectTitle",
    "RecordID",
    "RequestType",
];

static REQUEST_PROJECT_CREATE: PacketSchema = PacketSchema {
    required: PROJECT_CREATE_CARRIED,
    allowed: &[
        "Abstract",
        "BoardType",
        "GrantType",
        "PiBusinessPhoneComment",
        "PiBusinessPhoneExtension",
        "PiBusinessPhoneNumber",
        "PiCity",
        "PiCountry",
        "PiDepartment",
        "PiDnList",
        "PiEmail",
        "PiFax",
        "PiGlobalID",
        "PiHomePhoneComment",
        "PiHomePhoneExtension",
        "PiHomePhoneNumber",
        "PiMiddleName",
        "PiNsfStatusCode",
        "PiPersonID",
        "PiRemoteSiteLogin",
        "PiRequestedLoginList",
        "PiState",
        "PiStreetAddress",
        "PiStreetAddress2",
        "PiTitle",
        "PiZip",
        "ProjectID",
        "ProjectTitle",
        "RecordID",
        "RequestType",
    ],
    not_required_in_reply: &[],
    expected_reply: &[ExpectedReply::of(PacketType::NotifyProjectCreate)],
};

static NOTIFY_PROJECT_CREATE: PacketSchema = PacketSchema {
    required: &[
        "AllocationType",
        "EndDate",
        "GrantNumber",
        "PfosNumber",
        "PiFirstName",
        "PiLastName",
        "PiOrgCode",
        "PiOrganization",
        "PiPersonID",
        "PiRemoteSiteLogin",
        "ProjectID",
        "ResourceList",
        "ServiceUnitsAllocated",
        "StartDate",
    ],
    allowed: PI_OPTIONAL,
    not_required_in_reply: PROJECT_CREATE_CARRIED,
    expected_reply: &[ExpectedReply::of(PacketType::DataProjectCreate)],
};

static DATA_PROJECT_CREATE: PacketSchema = PacketSchema {
    required: &["PersonID", "ProjectID"],
    allowed: &["DnList"],
    not_required_in_reply: &[],
    expected_reply: ITC,
};

const PROJECT_STATE_KEYS: &[&str] = &["ProjectID", "ResourceList"];

static REQUEST_PROJECT_INACTIVATE: PacketSchema = PacketSchema {
    required: PROJECT_STATE_KEYS,
    allowed: &["Comment"],
    not_required_in_reply: &[],
    expected_reply: &[ExpectedReply::of(PacketType::NotifyProjectInactivate)],
};

static NOTIFY_PROJECT_INACTIVATE: PacketSchema = PacketSchema {
    required: PROJECT_STATE_KEYS,
    allowed: &["Comment"],
    not_required_in_reply: PROJECT_STATE_KEYS,
    expected_reply: ITC,
};

static REQUEST_PROJECT_REACTIVATE: PacketSchema = PacketSchema {
    required: PROJECT_STATE_KEYS,
    allowed: &["Comment", "PersonID"],
    not_required_in_reply: &[],
    expected_reply: &[ExpectedReply::of(PacketType::NotifyProjectReactivate)],
};

static NOTIFY_PROJECT_REACTIVATE: PacketSchema = PacketSchema {
    required: PROJECT_STATE_KEYS,
    allowed: &["Comment", "PersonID"],
    not_required_in_reply: PROJECT_STATE_KEYS,
    expected_reply: ITC,
};

// =============================================================================
// PERSON
// =============================================================================

static NOTIFY_PERSON_DUPLICATE: PacketSchema = PacketSchema {
    required: &[],
    allowed: &["GlobalID1", "GlobalID2", "PersonID1", "PersonID2"],
    not_required_in_reply: &[],
    expected_reply: ITC,
};

static NOTIFY_PERSON_IDS: PacketSchema = PacketSchema {
    required: &["PersonID", "PrimaryPersonID"],
    allowed: &["PersonIDList", "RemoveResourceList", "ResourceLogin"],
    not_required_in_reply: &[],
    expected_reply: ITC,
};

static REQUEST_PERSON_MERGE: PacketSchema = PacketSchema {
    required: &["DeleteGlobalID", "DeletePersonID", "KeepGlobalID", "KeepPersonID"],
    allowed: &["DeletePortalLogin", "KeepPortalLogin"],
    not_required_in_reply: &[],
    expected_reply: ITC,
};

// =============================================================================
// USER
// =============================================================================

static NOTIFY_USER_MODIFY: PacketSchema = PacketSchema {
    required: &["ActionType", "PersonID"],
    allowed: &[
        "AcademicDegree",
        "BusinessPhoneComment",
        "BusinessPhoneExtension",
        "BusinessPhoneNumber",
        "City",
        "Country",
        "Department",
        "DnList",
        "Email",
        "Fax",
        "FirstName",
        "HomePhoneComment",
        "HomePhoneExtension",
        "HomePhoneNumber",
        "LastName",
        "MiddleName",
        "OrgCode",
        "Organization",
        "State",
    ],
    not_required_in_reply: &[],
    expected_reply: ITC,
};

static REQUEST_USER_MODIFY: PacketSchema = PacketSchema {
    required: &["ActionType", "PersonID"],
    allowed: &[
        "AcademicDegree",
        "BusinessPhoneComment",
        "BusinessPhoneExtension",
        "BusinessPhoneNumber",
        "CitizenshipList",
        "City",
        "Country",
        "Department",
        "DnList",
        "Email",
        "Fax",
        "FirstName",
        "HomePhoneComment",
        "HomePhoneExtension",
        "HomePhoneNumber",
        "LastName",
        "MiddleName",
        "NsfStatusCode",
        "OrgCode",
        "Organization",
        "State",
        "StreetAddress",
        "StreetAddress2",
        "Title",
        "Zip",
    ],
    not_required_in_reply: &[],
    expected_reply: ITC,
};

pub(crate) fn lookup(kind: PacketType) -> &'static PacketSchema {
    match kind {
        PacketType::RequestAccountCreate => &REQUEST_ACCOUNT_CREATE,
        PacketType::NotifyAccountCreate => &NOTIFY_ACCOUNT_CREATE,
        PacketType::DataAccountCreate => &DATA_ACCOUNT_CREATE,
        PacketType::RequestAccountInactivate => &REQUEST_ACCOUNT_INACTIVATE,
        PacketType::NotifyAccountInactivate => &NOTIFY_ACCOUNT_INACTIVATE,
        PacketType::RequestAccountReactivate => &REQUEST_ACCOUNT_REACTIVATE,
        PacketType::NotifyAccountReactivate => &NOTIFY_ACCOUNT_REACTIVATE,
        PacketType::RequestProjectCreate => &REQUEST_PROJECT_CREATE,
        PacketType::NotifyProjectCreate => &NOTIFY_PROJECT_CREATE,
        PacketType::DataProjectCreate => &DATA_PROJECT_CREATE,
        PacketType::RequestProjectInactivate => &REQUEST_PROJECT_INACTIVATE,
        PacketType::NotifyProjectInactivate => &NOTIFY_PROJECT_INACTIVATE,
        PacketType::RequestProjectReactivate => &REQUEST_PROJECT_REACTIVATE,
        PacketType::NotifyProjectReactivate => &NOTIFY_PROJECT_REACTIVATE,
        PacketType::NotifyPersonDuplicate => &NOTIFY_PERSON_DUPLICATE,
        PacketType::NotifyPersonIds => &NOTIFY_PERSON_IDS,
        PacketType::RequestPersonMerge => &REQUEST_PERSON_MERGE,
        PacketType::NotifyUserModify => &NOTIFY_USER_MODIFY,
        PacketType::RequestUserModify => &REQUEST_USER_MODIFY,
        PacketType::InformTransactionComplete => &INFORM_TRANSACTION_COMPLETE,
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
