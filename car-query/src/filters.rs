//! Typed filters for each operation.
//!
//! These are a stricter alternative to building a [`QueryParams`] by hand:
//! each struct lists the options the API documents for one command, and only
//! the fields that are set end up in the query string.

use crate::params::QueryParams;

macro_rules! filter {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: Option<$ty>, )*
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            $(
                pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }

        impl From<$name> for QueryParams {
            fn from(filter: $name) -> Self {
                let mut params = QueryParams::new();
                $(
                    if let Some(value) = filter.$field {
                        params.insert(stringify!($field), value);
                    }
                )*
                params
            }
        }
    };
}

filter! {
    /// Options for `getMakes`.
    MakesFilter {
        /// Only makes with a model in this year.
        year: i64,
        /// Only makes sold (or not sold) in the US.
        sold_in_us: bool,
    }
}

filter! {
    /// Options for `getModels`. The API rejects requests without `make`.
    ModelsFilter {
        make: String,
        year: i64,
        sold_in_us: bool,
        /// Body type, e.g. Coupe, Sedan, SUV, Pickup.
        body: String,
    }
}

filter! {
    /// Options for `getTrims`. All optional; with none set the API returns
    /// its default page of trims.
    TrimsFilter {
        body: String,
        doors: i64,
        /// e.g. Front, Rear, AWD, 4WD
        drive: String,
        /// e.g. Front, Middle, Rear
        engine_position: String,
        /// e.g. V, in-line
        engine_type: String,
        /// e.g. Gasoline, Diesel
        fuel_type: String,
        /// `false` returns only year/make/model/trim fields.
        full_results: bool,
        /// Searched against year, make, model and trim.
        keyword: String,
        make: String,
        min_cylinders: i64,
        /// l/100km, highway
        min_lkm_hwy: f64,
        /// PS
        min_power: i64,
        /// km/h
        min_top_speed: i64,
        /// Nm
        min_torque: i64,
        /// kg
        min_weight: i64,
        min_year: i64,
        max_cylinders: i64,
        max_lkm_hwy: f64,
        max_power: i64,
        max_top_speed: i64,
        max_torque: i64,
        max_weight: i64,
        max_year: i64,
        model: String,
        seats: i64,
        sold_in_us: bool,
        year: i64,
    }
}

filter! {
    /// Options for `getModel`. `model` is the trim's `model_id`.
    ModelFilter {
        model: String,
    }
}
