//! Handle-based FFI for railcart.
//!
//! Functions:
//! - `railcart_create_default` / `railcart_create` - build a simulation, returns a handle
//! - `railcart_free` - release a handle
//! - `railcart_step` - advance one tick and write a snapshot
//! - `railcart_reset` / `railcart_set_params` / `railcart_set_running` - live controls
//! - `railcart_total_length` - track length for progress displays
//!
//! # Error Codes
//! - `0`: Success
//! - `-1`: Null pointer
//! - `-2`: Invalid curve (fewer than two control points)

use crate::ride::Simulation;
use crate::sim::{Float3, PhysicsConfig, Quaternion, RideParams};
use crate::track::ControlPoint;

const OK: i32 = 0;
const NULL_POINTER: i32 = -1;
const INVALID_CURVE: i32 = -2;

/// Opaque handle to a running simulation.
pub type RailcartHandle = *mut std::ffi::c_void;

/// Everything a renderer or HUD needs after one tick.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RailcartSnapshot {
    pub position: Float3,
    pub tangent: Float3,
    pub up: Float3,
    pub right: Float3,
    pub rotation: Quaternion,
    pub distance: f32,
    pub velocity: f32,
    pub speed_kmh: f32,
    pub vertical_g: f32,
    pub lateral_g: f32,
    pub longitudinal_g: f32,
}

impl RailcartSnapshot {
    fn capture(sim: &Simulation) -> Self {
        let output = sim.output();
        let state = sim.state();
        Self {
            position: output.position,
            tangent: output.frame.tangent,
            up: output.frame.up,
            right: output.frame.right,
            rotation: output.frame.rotation(),
            distance: state.distance,
            velocity: state.velocity,
            speed_kmh: state.speed_kmh(),
            vertical_g: state.forces.vertical,
            lateral_g: state.forces.lateral,
            longitudinal_g: state.forces.longitudinal,
        }
    }
}

/// Create a simulation on the built-in layout.
///
/// # Returns
/// - Valid handle on success (non-null)
/// - Null on error
#[no_mangle]
pub extern "C" fn railcart_create_default() -> RailcartHandle {
    match Simulation::with_default_layout() {
        Ok(sim) => into_handle(sim),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Create a simulation through `count` control points.
///
/// # Returns
/// - `0` on success, the handle is written to `handle_out`
/// - `-1` on null pointer
/// - `-2` if fewer than two points were given
///
/// # Safety
/// - `points` must point to at least `count` valid `ControlPoint`s
/// - `handle_out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn railcart_create(
    points: *const ControlPoint,
    count: usize,
    handle_out: *mut RailcartHandle,
) -> i32 {
    if handle_out.is_null() || (points.is_null() && count > 0) {
        return NULL_POINTER;
    }
    *handle_out = std::ptr::null_mut();

    let points = to_vec(points, count);
    match Simulation::new(points, RideParams::default(), PhysicsConfig::default()) {
        Ok(sim) => {
            *handle_out = into_handle(sim);
            OK
        }
        Err(_) => INVALID_CURVE,
    }
}

/// Free a simulation handle.
///
/// # Safety
/// - `handle` must be a valid handle returned by `railcart_create*`, or null
#[no_mangle]
pub unsafe extern "C" fn railcart_free(handle: RailcartHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle as *mut Simulation));
    }
}

/// Advance by `dt` seconds and write the resulting snapshot.
///
/// A paused simulation writes its current snapshot unchanged.
///
/// # Safety
/// - `handle` must be a valid handle from `railcart_create*`
/// - `out` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn railcart_step(
    handle: RailcartHandle,
    dt: f32,
    out: *mut RailcartSnapshot,
) -> i32 {
    let Some(sim) = as_sim(handle) else {
        return NULL_POINTER;
    };
    if out.is_null() {
        return NULL_POINTER;
    }

    sim.step(dt);
    *out = RailcartSnapshot::capture(sim);
    OK
}

/// Put the cart back at rest on the start of the track.
///
/// # Safety
/// - `handle` must be a valid handle from `railcart_create*`
#[no_mangle]
pub unsafe extern "C" fn railcart_reset(handle: RailcartHandle) -> i32 {
    let Some(sim) = as_sim(handle) else {
        return NULL_POINTER;
    };
    sim.reset();
    OK
}

/// Set cart mass and friction coefficient for the next tick.
///
/// Out-of-range values are clamped to the slider ranges.
///
/// # Safety
/// - `handle` must be a valid handle from `railcart_create*`
#[no_mangle]
pub unsafe extern "C" fn railcart_set_params(
    handle: RailcartHandle,
    mass: f32,
    friction: f32,
) -> i32 {
    let Some(sim) = as_sim(handle) else {
        return NULL_POINTER;
    };
    let params = sim.params().with_mass(mass).with_friction(friction);
    sim.set_params(params);
    OK
}

/// Pause (`running == 0`) or resume the simulation.
///
/// # Safety
/// - `handle` must be a valid handle from `railcart_create*`
#[no_mangle]
pub unsafe extern "C" fn railcart_set_running(handle: RailcartHandle, running: i32) -> i32 {
    let Some(sim) = as_sim(handle) else {
        return NULL_POINTER;
    };
    sim.set_running(running != 0);
    OK
}

/// Total track length, or a negative value for a null handle.
///
/// # Safety
/// - `handle` must be a valid handle from `railcart_create*`, or null
#[no_mangle]
pub unsafe extern "C" fn railcart_total_length(handle: RailcartHandle) -> f32 {
    match as_sim(handle) {
        Some(sim) => sim.curve().total_length(),
        None => -1.0,
    }
}

// --- Helpers ---

fn into_handle(sim: Simulation) -> RailcartHandle {
    Box::into_raw(Box::new(sim)) as RailcartHandle
}

unsafe fn as_sim<'a>(handle: RailcartHandle) -> Option<&'a mut Simulation> {
    (handle as *mut Simulation).as_mut()
}

unsafe fn to_vec<T: Copy>(ptr: *const T, len: usize) -> Vec<T> {
    if len == 0 || ptr.is_null() {
        Vec::new()
    } else {
        std::slice::from_raw_parts(ptr, len).to_vec()
    }
}
