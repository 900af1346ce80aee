use restmodel_model::EnumChoice;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Permission level of a user, as reported in its `role` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    System,
    Jms,
    CspRoot,
    Cms,
    CspOperator,
    OrgAdmin,
    OrgNetworkDesigner,
    SecurityAdministrator,
    AdminOperator,
    OrgUser,
    User,
    #[default]
    Unknown,
}

impl UserRole {
    pub const ALL: [Self; 12] = [
        Self::System,
        Self::Jms,
        Self::CspRoot,
        Self::Cms,
        Self::CspOperator,
        Self::OrgAdmin,
        Self::OrgNetworkDesigner,
        Self::SecurityAdministrator,
        Self::AdminOperator,
        Self::OrgUser,
        Self::User,
        Self::Unknown,
    ];

    /// Wire name of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "SYSTEM",
            Self::Jms => "JMS",
            Self::CspRoot => "CSPROOT",
            Self::Cms => "CMS",
            Self::CspOperator => "CSPOPERATOR",
            Self::OrgAdmin => "ORGADMIN",
            Self::OrgNetworkDesigner => "ORGNETWORKDESIGNER",
            Self::SecurityAdministrator => "SECURITYADMINISTRATOR",
            Self::AdminOperator => "ADMINOPERATOR",
            Self::OrgUser => "ORGUSER",
            Self::User => "USER",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Parses a wire name; anything unrecognized is [`UserRole::Unknown`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == name)
            .unwrap_or(Self::Unknown)
    }

    #[must_use]
    pub fn has_root(&self) -> bool {
        *self == Self::CspRoot
    }

    #[must_use]
    pub fn has_admin(&self) -> bool {
        *self == Self::OrgAdmin
    }

    #[must_use]
    pub fn has_admin_operator(&self) -> bool {
        *self == Self::AdminOperator
    }

    #[must_use]
    pub fn has_operator(&self) -> bool {
        *self == Self::CspOperator
    }

    #[must_use]
    pub fn has_security_admin(&self) -> bool {
        *self == Self::SecurityAdministrator
    }

    #[must_use]
    pub fn has_system(&self) -> bool {
        *self == Self::System
    }

    #[must_use]
    pub fn has_org_user(&self) -> bool {
        *self == Self::OrgUser
    }

    #[must_use]
    pub fn has_org_network_designer(&self) -> bool {
        *self == Self::OrgNetworkDesigner
    }

    /// Human description used in user summaries. Empty for roles without
    /// one.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::CspRoot => "data center administrator",
            Self::CspOperator => "data center operator",
            Self::OrgAdmin => "administrator of",
            Self::OrgNetworkDesigner => "network designer of",
            Self::OrgUser => "standard user of",
            Self::AdminOperator => "admin operator of",
            Self::SecurityAdministrator => "security administrator of",
            _ => "",
        }
    }

    /// Data center roles are not tied to an enterprise.
    #[must_use]
    pub fn is_data_center(&self) -> bool {
        matches!(self, Self::CspRoot | Self::CspOperator)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl EnumChoice for UserRole {
    fn choice_name(&self) -> &str {
        self.as_str()
    }
}
