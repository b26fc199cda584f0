mod account_flow_test;
mod helpers;
mod router_test;
