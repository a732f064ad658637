//! Field schemas shared by the Conversions API actions.
//!
//! Scalar schemas are built once and cloned into the actions that use them.
//! Actions that need a stricter variant derive it with the consuming
//! builders (`EVENT_TIME.clone().required()`), leaving the shared value as
//! declared here. Object schemas are assembled per call by [`contents`] and
//! [`user_data`], which report a malformed property list.

use std::sync::LazyLock;

use courier_parameter::prelude::*;

/// Values accepted for `action_source`.
pub const ACTION_SOURCES: [&str; 8] = [
    "email",
    "website",
    "app",
    "phone_call",
    "chat",
    "physical_store",
    "system_generated",
    "other",
];

pub static EVENT_TIME: LazyLock<ParameterDef> = LazyLock::new(|| {
    ParameterDef::new("event_time", "Event Time", ParameterKind::Datetime).with_description(
        "A timestamp indicating when the actual event occurred, as RFC 3339 or Unix seconds.",
    )
});

pub static ACTION_SOURCE: LazyLock<ParameterDef> = LazyLock::new(|| {
    ParameterDef::string("action_source", "Action Source")
        .with_description("This field allows you to specify where your conversions occurred.")
        .with_rule(ValidationRule::one_of(ACTION_SOURCES))
});

pub static CURRENCY: LazyLock<ParameterDef> = LazyLock::new(|| {
    ParameterDef::string("currency", "Currency").with_description(
        "The currency for the value specified. Currency must be a valid ISO 4217 three-letter code.",
    )
});

pub static VALUE: LazyLock<ParameterDef> = LazyLock::new(|| {
    ParameterDef::number("value", "Value").with_description(
        "A numeric value associated with this event, such as a monetary value or a score.",
    )
});

pub static CONTENT_IDS: LazyLock<ParameterDef> = LazyLock::new(|| {
    ParameterDef::string("content_ids", "Content IDs")
        .with_description("The content IDs associated with the event, such as product SKUs.")
        .multiple()
});

pub static CONTENT_CATEGORY: LazyLock<ParameterDef> = LazyLock::new(|| {
    ParameterDef::string("content_category", "Content Category")
        .with_description("The category of the content associated with the event.")
});

pub static CONTENT_NAME: LazyLock<ParameterDef> = LazyLock::new(|| {
    ParameterDef::string("content_name", "Content Name")
        .with_description("The name of the page or product associated with the event.")
});

pub static NUM_ITEMS: LazyLock<ParameterDef> = LazyLock::new(|| {
    ParameterDef::new("num_items", "Number of Items", ParameterKind::Integer)
        .with_description("The number of items the user tried to purchase.")
        .with_rule(ValidationRule::min(0.0))
});

pub fn contents() -> Result<ParameterDef, SchemaError> {
    let properties = ParameterCollection::try_from_defs([
        ParameterDef::string("id", "ID").required(),
        ParameterDef::new("quantity", "Quantity", ParameterKind::Integer),
        ParameterDef::number("item_price", "Item Price"),
        ParameterDef::string("delivery_category", "Delivery Category").with_rule(
            ValidationRule::one_of(["in_store", "curbside", "home_delivery"]),
        ),
    ])?;
    Ok(ParameterDef::object("contents", "Contents", properties)
        .with_description("A list of products with their quantity and item price.")
        .multiple())
}

pub fn user_data() -> Result<ParameterDef, SchemaError> {
    let properties = ParameterCollection::try_from_defs([
        ParameterDef::string("email", "Email").sensitive(),
        ParameterDef::string("phone", "Phone").sensitive(),
        ParameterDef::string("gender", "Gender")
            .with_rule(ValidationRule::one_of(["f", "m", "F", "M"])),
        ParameterDef::string("date_of_birth", "Date of Birth").sensitive(),
        ParameterDef::string("last_name", "Last Name").sensitive(),
        ParameterDef::string("first_name", "First Name").sensitive(),
        ParameterDef::string("city", "City"),
        ParameterDef::string("state", "State"),
        ParameterDef::string("zip", "Zip Code"),
        ParameterDef::string("country", "Country"),
        ParameterDef::string("external_id", "External ID"),
        ParameterDef::string("client_ip_address", "Client IP Address"),
        ParameterDef::string("client_user_agent", "Client User Agent"),
        ParameterDef::string("fbc", "Click ID"),
        ParameterDef::string("fbp", "Browser ID"),
        ParameterDef::string("subscription_id", "Subscription ID"),
        ParameterDef::string("lead_id", "Lead ID"),
        ParameterDef::string("fb_login_id", "Facebook Login ID"),
    ])?;
    Ok(ParameterDef::object("user_data", "User Data", properties).with_description(
        "Customer information. Personal fields are hashed before they are sent.",
    ))
}
