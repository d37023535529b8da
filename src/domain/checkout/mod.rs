mod cancel;
mod gateway;
mod initiate;
mod settle;
mod snapshot;

pub use cancel::checkout_cancel_endpoint;
pub use gateway::{
    CheckoutSession, HostedCheckoutClient, PaymentError, PaymentGateway, PaymentGatewayHandle,
    SessionLineItem,
};
pub use initiate::{CheckoutRedirect, checkout_endpoint, initiate_checkout};
pub use settle::{SettlementOutcome, checkout_success_endpoint, settle_cart};
pub use snapshot::{PricedLine, ensure_available, minor_units, priced_cart_lines};
