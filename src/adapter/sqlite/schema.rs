//! Diesel table definitions for the SQLite schema.

diesel::table! {
    products (id) {
        id -> Text,
        seller_id -> Text,
        title -> Text,
        byproduct_type -> Text,
        quantity -> BigInt,
        price_per_kg -> Text,
        quality_grade -> Text,
        quality_metrics -> Text,
        location -> Text,
        description -> Nullable<Text>,
        certifications -> Text,
        available_for_export -> Bool,
        status -> Text,
        image_url -> Nullable<Text>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    transactions (id) {
        id -> Text,
        product_id -> Text,
        buyer_id -> Text,
        seller_id -> Text,
        quantity -> BigInt,
        total_price -> Text,
        status -> Text,
        smart_contract_hash -> Nullable<Text>,
        delivery_terms -> Nullable<Text>,
        payment_terms -> Nullable<Text>,
        carbon_credits -> Nullable<Text>,
        created_at -> Text,
        completed_at -> Nullable<Text>,
    }
}

diesel::table! {
    iot_devices (id) {
        id -> Text,
        owner_id -> Text,
        device_name -> Text,
        device_type -> Text,
        location -> Text,
        status -> Text,
        last_reading -> Nullable<Text>,
        battery_level -> Nullable<Integer>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    price_predictions (id) {
        id -> Text,
        byproduct_type -> Text,
        current_price -> Text,
        predicted_price -> Text,
        prediction_date -> Text,
        confidence -> Text,
        factors -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    export_opportunities (id) {
        id -> Text,
        byproduct_type -> Text,
        target_country -> Text,
        demand_level -> Text,
        match_score -> BigInt,
        price_range -> Text,
        minimum_quantity -> BigInt,
        requirements -> Text,
        contact_info -> Text,
        created_at -> Text,
    }
}
