use lix_core::{Color, Phybits, Point, Rect, Topology};
use lix_terrain::{Terrain, TileKind, TileOccurrence};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const EARTH: Color = Color::from_rgb(0x90, 0x60, 0x30);

fn random_terrain(seed: u64, topology: Topology) -> Terrain {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut terrain = Terrain::new(topology);
    for _ in 0..12 {
        let rect = Rect::new(
            rng.gen_range(-8..topology.width()),
            rng.gen_range(-8..topology.height()),
            rng.gen_range(1..24),
            rng.gen_range(1..24),
        );
        let kind = if rng.gen_bool(0.25) {
            TileKind::Steel
        } else {
            TileKind::Terrain
        };
        terrain.add_occurrence(&TileOccurrence::filled(rect, EARTH, kind));
    }
    terrain
}

#[test]
fn lookup_mirrors_bitmap_after_random_mutation() {
    let topology = Topology::new(96, 64, true, false);
    let mut terrain = random_terrain(0x5eed_0001, topology);
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed_0002);

    for _ in 0..400 {
        let point = Point::new(rng.gen_range(-20..120), rng.gen_range(-4..68));
        if rng.gen_bool(0.5) {
            terrain.add_pixel(point, EARTH);
        } else {
            let was_steel = terrain.is_steel(point);
            assert_eq!(terrain.remove_pixel(point), was_steel);
        }
    }

    for y in 0..topology.height() {
        for x in 0..topology.width() {
            let point = Point::new(x, y);
            assert_eq!(
                terrain.is_solid(point),
                terrain.bitmap().pixel(point).is_opaque(),
                "lookup and bitmap diverged at {point:?}"
            );
        }
    }
}

#[test]
fn steel_pixels_are_never_removed() {
    let topology = Topology::new(64, 64, false, false);
    let mut terrain = random_terrain(0x0bad_5eed, topology);
    let steel_before = terrain.count_steel(Rect::new(0, 0, 64, 64));

    let _ = terrain.remove_rect(Rect::new(0, 0, 64, 64));

    assert_eq!(terrain.count_steel(Rect::new(0, 0, 64, 64)), steel_before);
    assert_eq!(terrain.count_solid(Rect::new(0, 0, 64, 64)), steel_before);
}

#[test]
fn torus_query_matches_wrapped_coordinate() {
    let topology = Topology::new(2048, 16, true, false);
    let mut terrain = Terrain::new(topology);
    terrain.add_pixel(Point::new(2, 8), EARTH);

    assert_eq!(terrain.get(Point::new(2050, 8)), terrain.get(Point::new(2, 8)));
    assert!(terrain.get(Point::new(2050, 8)).contains(Phybits::TERRAIN));
}
