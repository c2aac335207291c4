use super::fields::{FieldKind, FieldRule};

pub const CURRENCIES: &[&str] = &["NGN", "USD", "GHS", "KES", "ZAR"];

const NEWSLETTER_FIELDS: &[FieldRule] = &[FieldRule::required("email", "Email", FieldKind::Email)];

const SIGNUP_FIELDS: &[FieldRule] = &[
    FieldRule::required("firstName", "First name", FieldKind::Text),
    FieldRule::required("lastName", "Last name", FieldKind::Text),
    FieldRule::required("email", "Email", FieldKind::Email),
    FieldRule::optional("phone", "Phone number", FieldKind::Phone),
    FieldRule::required("password", "Password", FieldKind::Text),
];

const LOGISTICS_QUOTE_FIELDS: &[FieldRule] = &[
    FieldRule::required("fullName", "Full name", FieldKind::Text),
    FieldRule::required("email", "Email", FieldKind::Email),
    FieldRule::required("phone", "Phone number", FieldKind::Phone),
    FieldRule::required("pickupCountry", "Pickup country", FieldKind::Text),
    FieldRule::optional("pickupState", "Pickup state", FieldKind::Text),
    FieldRule::optional("pickupCity", "Pickup city", FieldKind::Text),
    FieldRule::required("deliveryCountry", "Delivery country", FieldKind::Text),
    FieldRule::optional("deliveryState", "Delivery state", FieldKind::Text),
    FieldRule::optional("deliveryCity", "Delivery city", FieldKind::Text),
    FieldRule::required("weight", "Package weight", FieldKind::Number),
    FieldRule::optional("description", "Package description", FieldKind::Text),
];

const INVENTORY_FINANCING_FIELDS: &[FieldRule] = &[
    FieldRule::required("businessName", "Business name", FieldKind::Text),
    FieldRule::required("fullName", "Full name", FieldKind::Text),
    FieldRule::required("email", "Email", FieldKind::Email),
    FieldRule::required("phone", "Phone number", FieldKind::Phone),
    FieldRule::required("amount", "Amount", FieldKind::Number),
    FieldRule::required("currency", "Currency", FieldKind::OneOf(CURRENCIES)),
    FieldRule::optional("tenure", "Tenure", FieldKind::Text),
    FieldRule::optional("purpose", "Purpose", FieldKind::Text),
];

const CONTACT_FIELDS: &[FieldRule] = &[
    FieldRule::required("name", "Name", FieldKind::Text),
    FieldRule::required("email", "Email", FieldKind::Email),
    FieldRule::optional("subject", "Subject", FieldKind::Text),
    FieldRule::required("message", "Message", FieldKind::Text),
];

/// Every form the site submits, with where it goes and what it must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Newsletter,
    Signup,
    LogisticsQuote,
    InventoryFinancing,
    Contact,
}

impl FormKind {
    pub const ALL: [FormKind; 5] = [
        FormKind::Newsletter,
        FormKind::Signup,
        FormKind::LogisticsQuote,
        FormKind::InventoryFinancing,
        FormKind::Contact,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            FormKind::Newsletter => "newsletter",
            FormKind::Signup => "sign-up",
            FormKind::LogisticsQuote => "logistics-quote",
            FormKind::InventoryFinancing => "inventory-financing",
            FormKind::Contact => "contact",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    /// Same-origin route the form posts to.
    pub fn endpoint_path(self) -> String {
        match self {
            FormKind::Newsletter => "/api/newsletter".to_string(),
            FormKind::Signup => "/api/shop/users/obana-sign-up".to_string(),
            other => format!("/api/forms/{}", other.slug()),
        }
    }

    /// Spreadsheet tab for kinds stored in Google Sheets.
    pub fn sheet_tab(self) -> Option<&'static str> {
        match self {
            FormKind::LogisticsQuote => Some("LogisticsQuotes"),
            FormKind::InventoryFinancing => Some("InventoryFinancing"),
            FormKind::Contact => Some("Contact"),
            FormKind::Newsletter | FormKind::Signup => None,
        }
    }

    /// Stable notification id, so a resubmission replaces the previous toast.
    pub fn toast_id(self) -> &'static str {
        match self {
            FormKind::Newsletter => "newsletter-submit",
            FormKind::Signup => "sign-up-submit",
            FormKind::LogisticsQuote => "logistics-quote-submit",
            FormKind::InventoryFinancing => "inventory-financing-submit",
            FormKind::Contact => "contact-submit",
        }
    }

    pub fn fields(self) -> &'static [FieldRule] {
        match self {
            FormKind::Newsletter => NEWSLETTER_FIELDS,
            FormKind::Signup => SIGNUP_FIELDS,
            FormKind::LogisticsQuote => LOGISTICS_QUOTE_FIELDS,
            FormKind::InventoryFinancing => INVENTORY_FINANCING_FIELDS,
            FormKind::Contact => CONTACT_FIELDS,
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            FormKind::Newsletter => "You have been subscribed to our newsletter",
            FormKind::Signup => "Account created successfully",
            FormKind::LogisticsQuote => "Quote request received. We will be in touch shortly",
            FormKind::InventoryFinancing => "Application received. We will be in touch shortly",
            FormKind::Contact => "Message sent successfully",
        }
    }
}
