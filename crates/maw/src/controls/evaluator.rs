use super::host::input_state;
use super::{BindingTable, InputHost, InputValue, KeyState};

pub fn any<H>(host: &H, state: KeyState, table: &BindingTable) -> Result<bool, H::Error>
where
    H: InputHost + ?Sized,
{
    Ok(find(host, state, table)?.is_some())
}

/// First truthy reading for `state`, walking devices in table order and keys in list order.
pub fn find<H>(
    host: &H,
    state: KeyState,
    table: &BindingTable,
) -> Result<Option<InputValue>, H::Error>
where
    H: InputHost + ?Sized,
{
    for (device, keys) in table.iter() {
        for key in keys {
            if let Some(value) = input_state(host, state, device, key)? {
                return Ok(Some(value));
            }
        }
    }
    Ok(None)
}
