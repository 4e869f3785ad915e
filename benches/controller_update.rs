use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Vec2, Vec3};
use std::rc::Rc;

use first_person_controls::core::{EventSurface, InputEventData, InputHost, Key, PointerButton};
use first_person_controls::{Camera, FirstPersonController};

fn dragging_controller() -> (FirstPersonController<Camera>, Rc<EventSurface>, Rc<EventSurface>) {
    let (host, _document, window) = InputHost::headless();
    let canvas = Rc::new(EventSurface::new("canvas"));
    let controller = FirstPersonController::new(Camera::at(Vec3::new(0.0, 1.7, 0.0)), &host, Some(canvas.clone()));

    canvas.dispatch(InputEventData::PointerDown {
        button: PointerButton::Primary,
    });
    (controller, canvas, window)
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    group.bench_function("idle", |b| {
        let (mut controller, _canvas, _window) = dragging_controller();
        b.iter(|| controller.update(black_box(0.016)));
    });

    group.bench_function("look_and_move", |b| {
        let (mut controller, canvas, window) = dragging_controller();
        window.dispatch(InputEventData::KeyDown { key: Key::KeyW });
        window.dispatch(InputEventData::KeyDown { key: Key::KeyD });

        b.iter(|| {
            canvas.dispatch(InputEventData::PointerMove {
                movement: black_box(Vec2::new(3.0, -1.5)),
            });
            controller.update(black_box(0.016));
        });
    });

    group.finish();
}

fn bench_pointer_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for events in [1usize, 8, 64] {
        group.bench_with_input(BenchmarkId::new("pointer_moves_per_frame", events), &events, |b, &events| {
            let (mut controller, canvas, _window) = dragging_controller();
            b.iter(|| {
                for i in 0..events {
                    canvas.dispatch(InputEventData::PointerMove {
                        movement: Vec2::new(i as f32, 1.0),
                    });
                }
                controller.update(0.016);
            });
        });
    }

    group.finish();
}

fn bench_look_at(c: &mut Criterion) {
    c.bench_function("look_at", |b| {
        let (mut controller, _canvas, _window) = dragging_controller();
        let mut t = 0.0f32;
        b.iter(|| {
            t += 0.01;
            controller.look_at(black_box(Vec3::new(t.sin() * 10.0, 0.0, t.cos() * 10.0)));
        });
    });
}

criterion_group!(benches, bench_update, bench_pointer_events, bench_look_at);
criterion_main!(benches);
