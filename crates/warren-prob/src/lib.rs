pub mod intercept;
pub mod mss;
pub mod params;
pub mod routes;
pub mod sweep;

pub use intercept::{
    intercepted_count, interception_probability, safe_routes, success_probability, total_routes,
    Policy,
};
pub use mss::{binomial, mss_scenario_count, ScenarioCache};
pub use params::{validate_params, ValidationError};
pub use routes::{
    route_count_i2p, route_count_no_repeat, route_count_tor, route_count_with_repeat,
    RouteCountError,
};
pub use sweep::{
    interception_series, route_series, scenario_series, InterceptVariable, Metric, RouteVariable,
    ScenarioVariable, SweepError, SweepRange,
};
