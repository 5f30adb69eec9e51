//! Fake data records per category and locale.

use chrono::{Duration, NaiveDate, Utc};
use fake::faker::address::raw::{
    BuildingNumber, CityName, CountryName, StateName, StreetName, ZipCode,
};
use fake::faker::company::raw::{CatchPhrase, CompanyName, Industry};
use fake::faker::internet::raw::{
    DomainSuffix, FreeEmail, IPv4, IPv6, MACAddress, SafeEmail, Username,
};
use fake::faker::job::raw::Title as JobTitle;
use fake::faker::lorem::raw::Word;
use fake::faker::name::raw::{FirstName, LastName, Name};
use fake::faker::phone_number::raw::{CellNumber, PhoneNumber};
use fake::locales::{EN, FR_FR, PT_BR};
use fake::Fake;
use rand::Rng;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use super::UtilityError;

pub const MAX_COUNT: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FakeKind {
    Name,
    Email,
    Address,
    Phone,
    Date,
    Company,
    Person,
    Internet,
    Uuid,
}

impl FakeKind {
    pub const ALL: [FakeKind; 9] = [
        FakeKind::Name,
        FakeKind::Email,
        FakeKind::Address,
        FakeKind::Phone,
        FakeKind::Date,
        FakeKind::Company,
        FakeKind::Person,
        FakeKind::Internet,
        FakeKind::Uuid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FakeKind::Name => "name",
            FakeKind::Email => "email",
            FakeKind::Address => "address",
            FakeKind::Phone => "phone",
            FakeKind::Date => "date",
            FakeKind::Company => "company",
            FakeKind::Person => "person",
            FakeKind::Internet => "internet",
            FakeKind::Uuid => "uuid",
        }
    }
}

impl fmt::Display for FakeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FakeKind {
    type Err = UtilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FakeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let supported: Vec<&str> = FakeKind::ALL.iter().map(FakeKind::as_str).collect();
                UtilityError::invalid(
                    "type",
                    format!("unknown type '{}' (supported: {})", wanted, supported.join(", ")),
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FakeLocale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "es-ES")]
    EsEs,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "it-IT")]
    ItIt,
}

impl FakeLocale {
    pub const ALL: [FakeLocale; 6] = [
        FakeLocale::PtBr,
        FakeLocale::EnUs,
        FakeLocale::EsEs,
        FakeLocale::FrFr,
        FakeLocale::DeDe,
        FakeLocale::ItIt,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            FakeLocale::PtBr => "pt-BR",
            FakeLocale::EnUs => "en-US",
            FakeLocale::EsEs => "es-ES",
            FakeLocale::FrFr => "fr-FR",
            FakeLocale::DeDe => "de-DE",
            FakeLocale::ItIt => "it-IT",
        }
    }
}

impl FromStr for FakeLocale {
    type Err = UtilityError;

    /// Accepts `pt-BR`, `pt_br`, `PT-BR` and the like.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-");
        FakeLocale::ALL
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| UtilityError::invalid("locale", format!("unsupported locale '{}'", s.trim())))
    }
}

/// Draws a `String` from a locale-parameterized faker.
macro_rules! localized {
    ($locale:expr, $faker:ident) => {
        match $locale {
            FakeLocale::PtBr => $faker(PT_BR).fake::<String>(),
            FakeLocale::FrFr => $faker(FR_FR).fake::<String>(),
            _ => $faker(EN).fake::<String>(),
        }
    };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FakeBatch {
    #[serde(rename = "type")]
    pub kind: FakeKind,
    pub count: u32,
    pub locale: FakeLocale,
    pub data: Vec<Value>,
}

pub fn validate_count(count: Option<u32>) -> Result<u32, UtilityError> {
    let count = count.unwrap_or(1);
    if !(1..=MAX_COUNT).contains(&count) {
        return Err(UtilityError::invalid(
            "count",
            format!("must be between 1 and {}", MAX_COUNT),
        ));
    }
    Ok(count)
}

/// Builds `count` records of `kind`.
pub fn generate(kind: FakeKind, count: Option<u32>, locale: FakeLocale) -> Result<FakeBatch, UtilityError> {
    let count = validate_count(count)?;
    let data = (0..count).map(|_| record(kind, locale)).collect();
    Ok(FakeBatch {
        kind,
        count,
        locale,
        data,
    })
}

/// One structured record for `kind`.
pub fn record(kind: FakeKind, locale: FakeLocale) -> Value {
    match kind {
        FakeKind::Name => json!({
            "fullName": localized!(locale, Name),
            "firstName": localized!(locale, FirstName),
            "lastName": localized!(locale, LastName),
            "username": localized!(locale, Username),
        }),
        FakeKind::Email => json!({
            "email": localized!(locale, FreeEmail),
            "safeEmail": localized!(locale, SafeEmail),
            "domain": domain(locale),
        }),
        FakeKind::Address => {
            let street = street_address(locale);
            let city = localized!(locale, CityName);
            let state = localized!(locale, StateName);
            let zip = localized!(locale, ZipCode);
            let country = localized!(locale, CountryName);
            json!({
                "fullAddress": format!("{}, {}, {} {}", street, city, state, zip),
                "streetAddress": street,
                "city": city,
                "state": state,
                "zipCode": zip,
                "country": country,
            })
        }
        FakeKind::Phone => json!({
            "phoneNumber": localized!(locale, PhoneNumber),
            "cellPhone": localized!(locale, CellNumber),
        }),
        FakeKind::Date => {
            let today = Utc::now().date_naive();
            let mut rng = rand::thread_rng();
            let past = Utc::now() - Duration::seconds(rng.gen_range(1..=365 * 86_400));
            let future = Utc::now() + Duration::seconds(rng.gen_range(1..=365 * 86_400));
            json!({
                "past": past.to_rfc3339(),
                "future": future.to_rfc3339(),
                "birthday": birthday(today, &mut rng).to_string(),
            })
        }
        FakeKind::Company => {
            let domain = domain(locale);
            json!({
                "name": localized!(locale, CompanyName),
                "industry": localized!(locale, Industry),
                "catchPhrase": localized!(locale, CatchPhrase),
                "url": format!("https://www.{}", domain),
            })
        }
        FakeKind::Person => json!({
            "name": localized!(locale, Name),
            "email": localized!(locale, FreeEmail),
            "phone": localized!(locale, PhoneNumber),
            "address": format!("{}, {}", street_address(locale), localized!(locale, CityName)),
            "company": localized!(locale, CompanyName),
            "jobTitle": localized!(locale, JobTitle),
        }),
        FakeKind::Internet => {
            let domain = domain(locale);
            json!({
                "email": localized!(locale, FreeEmail),
                "url": format!("https://{}", domain),
                "domain": domain,
                "ipv4": localized!(locale, IPv4),
                "ipv6": localized!(locale, IPv6),
                "macAddress": localized!(locale, MACAddress),
            })
        }
        FakeKind::Uuid => json!({ "uuid": uuid::Uuid::new_v4().to_string() }),
    }
}

/// A single scalar for `kind`, as used for dataset columns.
pub fn scalar(kind: FakeKind, locale: FakeLocale) -> String {
    match kind {
        FakeKind::Name | FakeKind::Person => localized!(locale, Name),
        FakeKind::Email => localized!(locale, FreeEmail),
        FakeKind::Address => format!(
            "{}, {}",
            street_address(locale),
            localized!(locale, CityName)
        ),
        FakeKind::Phone => localized!(locale, PhoneNumber),
        FakeKind::Date => birthday(Utc::now().date_naive(), &mut rand::thread_rng()).to_string(),
        FakeKind::Company => localized!(locale, CompanyName),
        FakeKind::Internet => format!("https://{}", domain(locale)),
        FakeKind::Uuid => uuid::Uuid::new_v4().to_string(),
    }
}

fn street_address(locale: FakeLocale) -> String {
    let number = localized!(locale, BuildingNumber);
    let street = localized!(locale, StreetName);
    match locale {
        FakeLocale::EnUs => format!("{} {}", number, street),
        _ => format!("{}, {}", street, number),
    }
}

fn domain(locale: FakeLocale) -> String {
    let word: String = localized!(locale, Word);
    let suffix: String = localized!(locale, DomainSuffix);
    let label: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let label = if label.is_empty() { "example".to_string() } else { label };
    format!("{}.{}", label, suffix)
}

/// A birthday for someone aged 18 to 80.
fn birthday(today: NaiveDate, rng: &mut impl Rng) -> NaiveDate {
    let days = rng.gen_range(18 * 365..=80 * 365);
    today - Duration::days(days)
}
