mod models;
mod printer;
mod runner;

pub use models::{RequestSummary, RunReport};
pub use printer::{
    decode_body, describe_error, print_deploying, print_primed, print_prime_warning,
    print_reading, print_response, print_submit_error, render_response,
};
pub use runner::run;
