mod common;

use common::{record, reported, reported_ok};
use fenrir_managed::{
    create_greeter, greeter_call_count, greeter_hello, hello, setup, shutdown, LifecycleStatus,
};

// Starting and stopping the event loop is process-wide, so the whole
// sequence lives in one test.
#[test]
fn start_stop_restart() {
    assert_eq!(LifecycleStatus::from_repr(shutdown()), Some(LifecycleStatus::NotRunning));

    assert_eq!(setup(), 0);
    assert_eq!(setup(), 0);

    assert_eq!(hello(), 0);
    let handle = reported_ok(|| create_greeter(record));
    assert_eq!(reported_ok(|| greeter_hello(handle, record)), 1);

    assert_eq!(LifecycleStatus::from_repr(shutdown()), Some(LifecycleStatus::Ok));
    assert_eq!(LifecycleStatus::from_repr(shutdown()), Some(LifecycleStatus::NotRunning));

    // The next export brings the loop back on its own.
    assert_eq!(hello(), 0);
    assert_eq!(reported_ok(|| greeter_call_count(0, record)), 3);

    // Greeters created by the previous loop are gone; handles restart at 1.
    let (code, _) = reported(|| greeter_hello(handle, record));
    assert_eq!(code, -1);
    assert_eq!(reported_ok(|| create_greeter(record)), 1);

    assert_eq!(shutdown(), 0);
}
