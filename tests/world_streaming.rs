use std::collections::HashSet;

use voxel_world::{
    application_state::{controls::SchemeKind, ApplicationState},
    engine_state::{
        config::WorldConfig,
        rendering::{meshing::mesh, BatchScene, ColorMaterials},
        voxels::{
            block::{block_type::BlockType, AIR},
            chunk::{Chunk, ChunkDimensions, ChunkPosition, TerrainFill},
            world::World,
        },
    },
    scripted_walk,
};

fn small_config() -> WorldConfig {
    WorldConfig {
        chunk_edge: 8,
        world_height: 16,
        render_distance: 2,
        terrain: TerrainFill::Flat { ground_level: 6 },
        spawn: [4.0, 9.0, 4.0],
        ..WorldConfig::default()
    }
}

#[test]
fn sample_configuration_parses() {
    let config = WorldConfig::from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/config/world.json"))
        .unwrap();
    assert_eq!(config, WorldConfig::default());
}

#[test]
fn scripted_walk_keeps_the_loaded_area_bounded() {
    let mut state = ApplicationState::new(&small_config()).unwrap();
    assert_eq!(state.controls.kind(), SchemeKind::Desktop);
    scripted_walk(&mut state, 240);

    let world = &state.engine_state.world;
    let viewpoint = world.viewpoint();
    assert_ne!(viewpoint, ChunkPosition::new(0, 0));

    let loaded: HashSet<ChunkPosition> = world.loaded_positions().collect();
    for dx in -2..=2 {
        for dz in -2..=2 {
            assert!(loaded.contains(&viewpoint.offset(dx, dz)));
        }
    }
    assert!(loaded
        .iter()
        .all(|position| position.chebyshev_distance(&viewpoint) <= 3));

    // Every loaded chunk is meshed and every live batch belongs to a loaded chunk.
    let owned: usize = loaded
        .iter()
        .map(|position| world.chunk(*position).unwrap().batches().len())
        .sum();
    assert_eq!(owned, world.scene().batch_count());
    assert_eq!(
        world.scene().added_total() - world.scene().removed_total(),
        owned as u64
    );

    state.dispose();
    assert_eq!(state.engine_state.world.scene().batch_count(), 0);
}

#[test]
fn touch_devices_walk_with_the_joystick() {
    let mut config = small_config();
    config.device.has_touch = true;
    config.device.viewport_width = 400;
    let mut state = ApplicationState::new(&config).unwrap();
    assert_eq!(state.controls.kind(), SchemeKind::Touch);

    scripted_walk(&mut state, 120);
    let position = state.controls.current_position();
    assert!(position.x > 4.0 + 8.0);
    assert_eq!(state.engine_state.world.viewpoint(), ChunkPosition::new(1, 0));
}

#[test]
fn digging_through_a_border_updates_both_chunks() {
    let mut world = World::new(&small_config(), BatchScene::new(), ColorMaterials::new()).unwrap();
    world.initialize();

    let quads_before = world.scene().total_quads();
    // World x = 7 is the last column of chunk 0 and borders chunk 1.
    for y in 0..=6 {
        assert!(world.set_block(7, y, 3, AIR));
    }
    assert_eq!(world.get_block(7, 3, 3), AIR);
    assert_eq!(world.get_block(8, 3, 3), BlockType::DIRT.id());
    assert_eq!(world.chunk(ChunkPosition::new(1, 0)).unwrap().mesh_generation(), 8);
    assert_ne!(world.scene().total_quads(), quads_before);

    // Meshes stay exact after the edits.
    let chunk = world.chunk(ChunkPosition::new(0, 0)).unwrap();
    let greedy = mesh::greedy(chunk, &mut Vec::new());
    assert_eq!(greedy.unit_faces(), mesh::naive(chunk).unit_faces());
}

#[test]
fn random_terrain_meshes_exactly() {
    let dimensions = ChunkDimensions::new(8, 12).unwrap();
    for seed in 0..4u64 {
        let fill = TerrainFill::Random {
            block: None,
            density: 0.35,
            seed,
        };
        let chunk = Chunk::generate(ChunkPosition::new(seed as i32, 1), dimensions, &fill);
        let greedy = mesh::greedy(&chunk, &mut Vec::new());
        let naive = mesh::naive(&chunk);
        assert_eq!(greedy.unit_faces(), naive.unit_faces());
        assert!(greedy.quad_count() <= naive.quad_count());
    }
}
