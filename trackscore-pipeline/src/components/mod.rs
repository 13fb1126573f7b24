pub mod decision_filter;
pub mod mock_order_source;
pub mod page_defaults_query_hydrator;
pub mod payment_mode_filter;
pub mod risk_band_hydrator;
pub mod rto_risk_scorer;
pub mod search_filter;
pub mod ship_decision_hydrator;
pub mod shipping_plan_side_effect;
pub mod sort_selector;
