mod drilldown_state;

pub use drilldown_state::{
    DrillDownLevel, DrillDownState, ORGANIZATIONS_LABEL, PAYMENT_CHANNELS_LABEL, ROOT_LABEL,
};
