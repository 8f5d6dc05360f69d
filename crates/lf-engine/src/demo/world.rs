//! Locations, items, and exits of the demo facility.

use std::sync::Arc;

use lf_core::{AttrValue, Capability, Direction, Exit, Guard, Item, Location, Owner, World};

use super::keys;
use crate::error::EngineResult;

/// Colors of the spout buttons.
pub const COLORS: [&str; 4] = ["red", "yellow", "green", "blue"];

/// Build and seal the facility.
pub fn build() -> EngineResult<World> {
    let mut world = World::new();

    let dormitory = world.add_location(Location::new(keys::DORMITORY, "Dormitory").describe(
        "A cramped sleeping room that smells of machine oil. A bunk is bolted to one wall \
         beside a row of lockers. A doorway leads north and a ladder drops through a hatch \
         in the floor.",
    ))?;
    let bunk = world.add_location(Location::new(keys::BUNK, "Bunk").nouns(["bunk", "bed"]))?;
    world.nest(dormitory, bunk)?;

    let cellar = world.add_location(
        Location::new(keys::CELLAR, "Cellar")
            .describe("A low cellar full of dust and broken crates. A ladder leads up.")
            .dark(),
    )?;
    let corridor = world.add_location(Location::new(keys::CORRIDOR, "Corridor").describe(
        "A long corridor with flickering panels. The lab door is to the north, a low \
         crawlspace opens to the west, and the machine shop lies east. The dormitory is \
         back to the south.",
    ))?;
    let storage = world.add_location(
        Location::new(keys::STORAGE, "Storage")
            .describe("A cluttered storage bay. The only way out is the crawlspace to the east.")
            .dark(),
    )?;
    let shop = world.add_location(Location::new(keys::MACHINE_SHOP, "Machine Shop").describe(
        "Pipes crowd the ceiling of this workshop. A spout juts from the wall above a \
         grating, and beside it is a panel of buttons: red, yellow, green and blue, plus \
         a round one and a square one.",
    ))?;
    let lab = world.add_location(Location::new(keys::LAB, "Lab").describe(
        "Benches of abandoned equipment. A heavy door to the east is marked BIO LOCK and has \
         a numeric keypad beside it.",
    ))?;
    let bio_lock = world.add_location(Location::new(keys::BIO_LOCK, "Bio Lock").describe(
        "A sterile chamber between two doors. Red lights pulse overhead. A passage leads north.",
    ))?;
    let gantry = world.add_location(Location::new(keys::GANTRY, "Gantry").describe(
        "A narrow gantry over a deep shaft. An elevator waits at the north end.",
    ))?;
    let elevator = world.add_location(
        Location::new(keys::ELEVATOR, "Elevator")
            .describe("A cage of steel mesh. The controls are dead; it seems to run on its own."),
    )?;
    // Reached only by riding the lift.
    world.add_location(Location::new(keys::ROOF, "Roof").describe(
        "Wind howls across the roof of the facility. Far below, the lights of the colony \
         stretch to the horizon. You made it out.",
    ))?;

    // Dormitory.
    for (key, name, desc) in [
        (keys::RED_CLOAK, "red cloak", "A heavy cloak of red wool."),
        (keys::BLUE_CLOAK, "blue cloak", "A thin cloak of blue silk."),
    ] {
        world.add_item(
            Item::new(key, name)
                .describe(desc)
                .with(Capability::Takeable)
                .with(Capability::Wearable),
            Owner::Location(dormitory),
        )?;
    }
    world.add_item(
        Item::new(keys::LANTERN, "brass lantern")
            .nouns(["lantern", "lamp"])
            .describe("A battered brass lantern with a switch on the side.")
            .with(Capability::Takeable)
            .with(Capability::Switchable)
            .with(Capability::LightSource)
            .weight(2),
        Owner::Location(dormitory),
    )?;
    let locker = world.add_item(
        Item::new(keys::LOCKER, "locker")
            .describe("A dented steel locker.")
            .with(Capability::Openable)
            .holding(2)
            .scenery(),
        Owner::Location(dormitory),
    )?;
    world.add_item(
        Item::new(keys::RATION_BAR, "ration bar")
            .describe("A foil-wrapped bar of compressed protein.")
            .with(Capability::Takeable)
            .with(Capability::Edible),
        Owner::Item(locker),
    )?;

    // Cellar.
    let crate_box = world.add_item(
        Item::new(keys::CRATE, "wooden crate")
            .nouns(["crate", "box"])
            .describe("A splintered crate with the lid missing.")
            .holding(4)
            .opened(),
        Owner::Location(cellar),
    )?;
    world.add_item(
        Item::new(keys::FUSE, "fuse")
            .describe("A ceramic fuse, still in working order.")
            .with(Capability::Takeable)
            .points(10),
        Owner::Item(crate_box),
    )?;

    // Corridor.
    let door = world.add_item(
        Item::new(keys::LAB_DOOR, "lab door")
            .describe("A sliding door stencilled LAB.")
            .with(Capability::Openable)
            .scenery(),
        Owner::Location(corridor),
    )?;

    // Storage.
    let case = world.add_item(
        Item::new(keys::GLASS_CASE, "glass case")
            .describe("A display case of thick glass.")
            .with(Capability::Openable)
            .with(Capability::Transparent)
            .holding(2),
        Owner::Location(storage),
    )?;
    world.add_item(
        Item::new(keys::GLOW_LAMP, "glow lamp")
            .nouns(["lamp", "glow"])
            .describe("A sealed lamp glowing a soft green.")
            .with(Capability::Takeable)
            .with(Capability::Switchable)
            .with(Capability::LightSource)
            .switched_on(),
        Owner::Item(case),
    )?;
    world.add_item(
        Item::new(keys::WRENCH, "heavy wrench")
            .nouns(["wrench", "spanner"])
            .describe("A heavy adjustable wrench.")
            .with(Capability::Takeable)
            .with(Capability::Weapon)
            .weight(3),
        Owner::Location(storage),
    )?;

    // Machine shop.
    let mut flask = Item::new(keys::FLASK, "glass flask")
        .describe("A sturdy laboratory flask.")
        .with(Capability::Takeable);
    flask.attrs.set("fluid", AttrValue::Text(String::new()));
    world.add_item(flask, Owner::Location(shop))?;
    world.add_item(
        Item::new(keys::SPOUT, "spout")
            .describe("A brass spout above a drain grating.")
            .scenery(),
        Owner::Location(shop),
    )?;
    for color in COLORS {
        let mut button = Item::new(format!("{color}_button"), format!("{color} button")).scenery();
        button.attrs.set("color", AttrValue::Text(color.to_string()));
        world.add_item(button, Owner::Location(shop))?;
    }
    for shape in ["round", "square"] {
        let mut button = Item::new(format!("{shape}_button"), format!("{shape} button")).scenery();
        button.attrs.set("shape", AttrValue::Text(shape.to_string()));
        world.add_item(button, Owner::Location(shop))?;
    }

    // Lab.
    world.add_item(
        Item::new(keys::NOTEBOOK, "notebook")
            .describe("A grease-stained notebook.")
            .with(Capability::Takeable)
            .text("Most pages are smudged, but one line stands out: \"bio lock code: 372\"."),
        Owner::Location(lab),
    )?;
    world.add_item(
        Item::new(keys::KEYPAD, "keypad")
            .describe("A keypad with the digits 0 to 9.")
            .scenery(),
        Owner::Location(lab),
    )?;

    // Pip follows the player around; it starts in the dormitory.
    world.add_item(
        Item::new(keys::PIP_ITEM, "Pip")
            .nouns(["pip", "robot"])
            .describe("Pip is a knee-high maintenance robot with one wobbly antenna.")
            .scenery(),
        Owner::Location(dormitory),
    )?;

    // Exits.
    world.link(dormitory, Direction::North, corridor)?;
    world.link(dormitory, Direction::Down, cellar)?;
    world.link(corridor, Direction::East, shop)?;
    let door_closed = "The lab door is closed.";
    world.connect(
        corridor,
        Direction::North,
        Exit::to(lab).guarded(Guard::ItemOpen(door), door_closed),
    )?;
    world.connect(
        lab,
        Direction::South,
        Exit::to(corridor).guarded(Guard::ItemOpen(door), door_closed),
    )?;
    let squeeze = "You can't squeeze through the crawlspace carrying all that.";
    world.connect(corridor, Direction::West, Exit::to(storage).with_weight_limit(4, squeeze))?;
    world.connect(storage, Direction::East, Exit::to(corridor).with_weight_limit(4, squeeze))?;
    world.connect(
        lab,
        Direction::East,
        Exit::to(bio_lock).guarded(
            Guard::Flag {
                location: lab,
                key: keys::BIO_LOCK_OPEN.to_string(),
            },
            "The bio lock door is sealed. The keypad beside it glows expectantly.",
        ),
    )?;
    world.connect(bio_lock, Direction::West, Exit::to(lab))?;
    world.link(bio_lock, Direction::North, gantry)?;
    world.connect(gantry, Direction::North, Exit::to(elevator))?;
    world.connect(gantry, Direction::In, Exit::to(elevator))?;
    let stopped = Arc::new(move |ctx: &lf_core::Context| {
        ctx.world()
            .location(elevator)
            .is_ok_and(|l| !l.attrs.flag(keys::LIFT_RUNNING))
    });
    for dir in [Direction::South, Direction::Out] {
        world.connect(
            elevator,
            dir,
            Exit::to(gantry).guarded(Guard::Custom(stopped.clone()), "The mesh doors are shut."),
        )?;
    }

    world.seal();
    world.check_ownership()?;
    tracing::debug!(items = world.item_count(), "demo world built");
    Ok(world)
}
