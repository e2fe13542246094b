use serde::{Deserialize, Serialize};

use ds_types::Kind;

use crate::document::{assign_string, Document};

/// Human-oriented description of a dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(skip)]
    pub path: String,
    #[serde(rename = "accessURL", skip_serializing_if = "String::is_empty")]
    pub access_url: String,
    #[serde(rename = "accrualPeriodicity", skip_serializing_if = "String::is_empty")]
    pub accrual_periodicity: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "downloadURL", skip_serializing_if = "String::is_empty")]
    pub download_url: String,
    #[serde(rename = "homeURL", skip_serializing_if = "String::is_empty")]
    pub home_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub identifier: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub language: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qri: Option<Kind>,
    #[serde(rename = "readmeURL", skip_serializing_if = "String::is_empty")]
    pub readme_url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub theme: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
}

/// License under which a dataset is published.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

impl Document for Meta {
    const KIND: Kind = Kind::Meta;
    const FIELD: &'static str = "meta";

    fn path(&self) -> &str {
        &self.path
    }

    fn set_path(&mut self, path: String) {
        self.path = path;
    }

    fn kind(&self) -> Option<Kind> {
        self.qri
    }

    fn set_kind(&mut self, kind: Option<Kind>) {
        self.qri = kind;
    }

    fn is_empty(&self) -> bool {
        self.access_url.is_empty()
            && self.accrual_periodicity.is_empty()
            && self.description.is_empty()
            && self.download_url.is_empty()
            && self.home_url.is_empty()
            && self.identifier.is_empty()
            && self.keywords.is_empty()
            && self.language.is_empty()
            && self.license.is_none()
            && self.readme_url.is_empty()
            && self.theme.is_empty()
            && self.title.is_empty()
            && self.version.is_empty()
    }

    fn assign(&mut self, other: &Self) {
        assign_string(&mut self.path, &other.path);
        assign_string(&mut self.access_url, &other.access_url);
        assign_string(&mut self.accrual_periodicity, &other.accrual_periodicity);
        assign_string(&mut self.description, &other.description);
        assign_string(&mut self.download_url, &other.download_url);
        assign_string(&mut self.home_url, &other.home_url);
        assign_string(&mut self.identifier, &other.identifier);
        assign_string(&mut self.readme_url, &other.readme_url);
        assign_string(&mut self.title, &other.title);
        assign_string(&mut self.version, &other.version);
        if other.qri.is_some() {
            self.qri = other.qri;
        }
        if !other.keywords.is_empty() {
            self.keywords = other.keywords.clone();
        }
        if !other.language.is_empty() {
            self.language = other.language.clone();
        }
        if !other.theme.is_empty() {
            self.theme = other.theme.clone();
        }
        if other.license.is_some() {
            self.license = other.license.clone();
        }
    }
}
