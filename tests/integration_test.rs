use newton_fractal::{
    complex, poly, roots, CancellationToken, Complex, Error, FailurePolicy, NewtonConfig,
    NewtonFractal, Pixel, Poly, RootedPoly, Scheduler, Viewport, NO_ROOT,
};

fn square_minus_one() -> NewtonFractal {
    NewtonFractal::from_roots(&[complex!(1.0), complex!(-1.0)]).unwrap()
}

fn cube_roots_of_unity() -> NewtonFractal {
    let roots = Complex::ONE.root(3).unwrap();
    NewtonFractal::new(RootedPoly::new(&roots).unwrap(), NewtonConfig::default()).unwrap()
}

#[test]
fn three_by_three_scenario() {
    let fractal = square_minus_one();
    let viewport = Viewport::new(-2.0, 2.0, -2.0, 2.0, 3, 3, 17).unwrap();
    let scheduler = Scheduler::builder().with_threads(3).build().unwrap();
    let image = scheduler.produce(&fractal, &viewport).unwrap();

    assert_eq!(image.request_id, 17);
    assert_eq!(image.root_count_plus_one, 3);
    assert_eq!((image.width, image.height), (3, 3));
    assert_eq!(image.indices[viewport.offset(Pixel(0, 1))], 2);
    assert_eq!(image.indices[viewport.offset(Pixel(2, 1))], 1);
    assert_eq!(image.indices[viewport.offset(Pixel(1, 1))], 0);
    scheduler.shutdown();
}

#[test]
fn one_worker_matches_many() {
    let _ = simple_logger::init_with_level(log::Level::Debug);
    let fractal = cube_roots_of_unity();
    let viewport = Viewport::new(-1.5, 1.5, -1.0, 1.0, 61, 43, 0).unwrap();

    let single = Scheduler::builder()
        .with_threads(1)
        .with_bands_per_thread(1)
        .build()
        .unwrap();
    let many = Scheduler::builder()
        .with_threads(4)
        .with_bands_per_thread(7)
        .build()
        .unwrap();

    let a = single.produce(&fractal, &viewport).unwrap();
    let b = many.produce(&fractal, &viewport).unwrap();
    assert_eq!(a.indices, b.indices);
    assert_eq!(a, fractal.render_sequential(&viewport));
    // every root owns part of the picture
    for k in 1..=3 {
        assert!(a.indices.contains(&k), "root {k} missing");
    }
}

#[test]
fn more_bands_than_rows() {
    let fractal = square_minus_one();
    let viewport = Viewport::new(-2.0, 2.0, -2.0, 2.0, 5, 4, 1).unwrap();
    let scheduler = Scheduler::builder()
        .with_threads(2)
        .with_bands_per_thread(8)
        .build()
        .unwrap();
    let image = scheduler.produce(&fractal, &viewport).unwrap();
    assert_eq!(image, fractal.render_sequential(&viewport));
}

#[test]
fn scheduler_is_reused_across_requests() {
    let scheduler = Scheduler::builder().with_threads(2).build().unwrap();
    let fractal = cube_roots_of_unity();
    for id in 0..5 {
        let viewport = Viewport::new(-1.0, 1.0, -1.0, 1.0, 16 + id, 9, id as u64).unwrap();
        let image = scheduler.produce(&fractal, &viewport).unwrap();
        assert_eq!(image.request_id, id as u64);
        assert_eq!(image.indices.len(), (16 + id) * 9);
    }
}

#[test]
fn cancelled_request() {
    let scheduler = Scheduler::builder().with_threads(2).build().unwrap();
    let token = CancellationToken::new();
    let viewport = Viewport::new(-1.0, 1.0, -1.0, 1.0, 8, 8, 23).unwrap();
    token.clone().cancel();
    let result = scheduler.produce_with_cancel(&cube_roots_of_unity(), &viewport, &token);
    assert!(matches!(result, Err(Error::Cancelled { request_id: 23 })));
}

#[test]
fn failure_policy_defaults_to_swallow() {
    let scheduler = Scheduler::new().unwrap();
    assert_eq!(scheduler.failure_policy(), FailurePolicy::SwallowAndDefault);
    assert!(scheduler.threads() >= 1);
}

#[test]
fn viewport_corners() {
    let viewport = Viewport::new(-3.0, 1.0, -0.5, 2.5, 10, 20, 0).unwrap();
    assert_eq!(viewport.pixel_to_point(Pixel(0, 0)), complex!(-3.0, 2.5));
    assert_eq!(viewport.pixel_to_point(Pixel(9, 19)), complex!(1.0, -0.5));
}

#[test]
fn rooted_poly_at_zero() {
    let p = roots![complex!(2.0, 1.0), complex!(1.0, 0.0), complex!(0.0, -4.0)];
    assert_eq!(p.apply(Complex::ZERO), complex!(-4.0, 8.0));
}

#[test]
fn zero_poly_derivative() {
    assert_eq!(Poly::zero().derive(), Poly::zero());
    assert_eq!(poly![].derive(), poly![0.0]);
}

#[test]
fn classify_by_parsed_roots() {
    let roots: Vec<Complex> = ["1", "-0.5 + i0.8660254037844386", "-0.5 - i0.8660254037844386"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let fractal = NewtonFractal::from_roots(&roots).unwrap();
    assert_eq!(fractal.classify(complex!(2.0, 0.1)), 1);
    assert_eq!(fractal.classify(complex!(-1.0, 2.0)), 2);
    assert_eq!(fractal.classify(complex!(-1.0, -2.0)), 3);
    assert_eq!(
        fractal.rooted().index_of_closest_root(complex!(5.0), 0.002).unwrap(),
        NO_ROOT
    );
}
