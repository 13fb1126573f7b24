pub mod order_triage;
