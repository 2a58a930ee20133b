use criterion::{black_box, criterion_group, criterion_main, Criterion};
use carvis::core::{rotate, BodySpec, CarSprite, Resample};
use carvis::scene::{SceneComposer, SceneConfig};
use carvis::types::{Palette, PivotConvention, Pose};

fn bench_scene_step(c: &mut Criterion) {
    let mut scene = SceneComposer::open(SceneConfig::headless()).unwrap();
    let mut heading = 0.0_f64;

    c.bench_function("scene_step_500x500", |b| {
        b.iter(|| {
            heading += 0.01;
            scene
                .step(black_box(Pose::new(200.0, 220.0, heading, 0.3)))
                .unwrap()
        })
    });
}

fn bench_car_update(c: &mut Criterion) {
    let spec = BodySpec::new(40.0).unwrap();
    let mut car = CarSprite::new(spec, &Palette::default(), PivotConvention::RearAxle);

    c.bench_function("car_update", |b| {
        b.iter(|| {
            car.update(black_box(100.0), black_box(100.0), 33.0, -20.0);
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let spec = BodySpec::new(40.0).unwrap();
    let car = CarSprite::new(spec, &Palette::default(), PivotConvention::RearAxle);
    let base = car.base_image().clone();

    c.bench_function("rotate_smooth_33deg", |b| {
        b.iter(|| rotate(black_box(&base), 33.0, Resample::Smooth))
    });
    c.bench_function("rotate_nearest_33deg", |b| {
        b.iter(|| rotate(black_box(&base), 33.0, Resample::Nearest))
    });
    c.bench_function("rotate_quarter_turn", |b| {
        b.iter(|| rotate(black_box(&base), 90.0, Resample::Smooth))
    });
}

criterion_group!(benches, bench_scene_step, bench_car_update, bench_rotate);
criterion_main!(benches);
