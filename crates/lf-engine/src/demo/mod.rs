//! The demo content pack: a small research facility with a flask puzzle, a
//! chase, an elevator ride, and a robot companion.
//!
//! ```no_run
//! use lf_engine::{CannedSpeech, EngineConfig, GameSession, demo};
//!
//! let config = EngineConfig::default();
//! let mut session = GameSession::new(demo::build()?, &config, CannedSpeech::default())?;
//! let turn = session.process("take lantern")?;
//! println!("{}", turn.narration);
//! # Ok::<(), lf_engine::EngineError>(())
//! ```

pub mod actors;
pub mod hooks;
pub mod world;

use lf_schedule::Actor;

use crate::content::Content;
use crate::error::EngineResult;
use crate::game::Game;
use crate::session::Pack;

/// Keys for everything the pack refers to by name.
pub mod keys {
    use lf_core::ActorKey;

    /// Starting room.
    pub const DORMITORY: &str = "dormitory";
    /// Bunk inside the dormitory.
    pub const BUNK: &str = "bunk";
    /// Dark room under the dormitory.
    pub const CELLAR: &str = "cellar";
    /// Hub room.
    pub const CORRIDOR: &str = "corridor";
    /// Dark room behind the crawlspace.
    pub const STORAGE: &str = "storage";
    /// Flask puzzle room.
    pub const MACHINE_SHOP: &str = "machine_shop";
    /// Keypad room.
    pub const LAB: &str = "lab";
    /// Where the chase starts.
    pub const BIO_LOCK: &str = "bio_lock";
    /// Between the bio lock and the elevator.
    pub const GANTRY: &str = "gantry";
    /// Where the chase ends and the ride starts.
    pub const ELEVATOR: &str = "elevator";
    /// Where the ride ends.
    pub const ROOF: &str = "roof";

    /// Red cloak.
    pub const RED_CLOAK: &str = "red_cloak";
    /// Blue cloak.
    pub const BLUE_CLOAK: &str = "blue_cloak";
    /// Brass lantern.
    pub const LANTERN: &str = "lantern";
    /// Dormitory locker.
    pub const LOCKER: &str = "locker";
    /// Ration bar in the locker.
    pub const RATION_BAR: &str = "ration_bar";
    /// Crate in the cellar.
    pub const CRATE: &str = "crate";
    /// Fuse in the crate.
    pub const FUSE: &str = "fuse";
    /// Door between corridor and lab.
    pub const LAB_DOOR: &str = "lab_door";
    /// Glass case in storage.
    pub const GLASS_CASE: &str = "glass_case";
    /// Lamp inside the glass case.
    pub const GLOW_LAMP: &str = "glow_lamp";
    /// Wrench in storage.
    pub const WRENCH: &str = "wrench";
    /// Flask in the machine shop.
    pub const FLASK: &str = "flask";
    /// Spout in the machine shop.
    pub const SPOUT: &str = "spout";
    /// Notebook with the bio lock code.
    pub const NOTEBOOK: &str = "notebook";
    /// Keypad beside the bio lock.
    pub const KEYPAD: &str = "keypad";
    /// The robot.
    pub const PIP_ITEM: &str = "pip";

    /// Lab attribute: the bio lock door is open.
    pub const BIO_LOCK_OPEN: &str = "bio_lock_open";
    /// Elevator attribute: the ride is under way.
    pub const LIFT_RUNNING: &str = "lift_running";
    /// Machine shop attribute: the flask is under the spout.
    pub const FLASK_UNDER_SPOUT: &str = "flask_under_spout";
    /// Machine shop attribute: the flask has been filled at least once.
    pub const FLASK_FILLED: &str = "flask_filled";
    /// Bio lock attribute: the mutants are loose.
    pub const CHASE_STARTED: &str = "chase_started";

    /// Posted by the eat default.
    pub const ATE: &str = "ate";
    /// Posted when the player sleeps.
    pub const SLEPT: &str = "slept";
    /// Posted on entering the bio lock.
    pub const CHASE_BEGIN: &str = "chase_begin";
    /// Posted on entering the elevator.
    pub const LIFT_BEGIN: &str = "lift_begin";
    /// Posted when the player fiddles with the doors mid-ride.
    pub const LIFT_INTERRUPT: &str = "lift_interrupt";
    /// Posted when the player talks to Pip.
    pub const PIP_TALK: &str = "pip_talk";

    /// The mutants.
    pub const CHASE: ActorKey = ActorKey("chase");
    /// Hunger and fatigue.
    pub const VITALS: ActorKey = ActorKey("vitals");
    /// Pip.
    pub const PIP: ActorKey = ActorKey("pip");
    /// The elevator ride.
    pub const LIFT: ActorKey = ActorKey("lift");
}

/// Game title.
pub const TITLE: &str = "LANTERNFALL";

const INTRO: &str = "The alarms stopped an hour ago. Since then the facility has been \
silent, apart from Pip humming to itself and something, far off, that might be howling. \
The way out is up.";

/// Chance per turn that Pip speaks unprompted.
pub const PIP_CHATTER: f64 = 0.15;

/// Build the pack: world, hooks, and actors.
pub fn build() -> EngineResult<Pack> {
    let world = world::build()?;
    let loc = |key: &str| world.location_by_key(key);
    let item = |key: &str| world.item_by_key(key);

    let dormitory = loc(keys::DORMITORY)?;
    let lab = loc(keys::LAB)?;
    let bio_lock = loc(keys::BIO_LOCK)?;
    let elevator = loc(keys::ELEVATOR)?;
    let roof = loc(keys::ROOF)?;
    let shop = loc(keys::MACHINE_SHOP)?;
    let flask = item(keys::FLASK)?;
    let pip = item(keys::PIP_ITEM)?;

    let mut content = Content::new(TITLE, dormitory).with_intro(INTRO);
    content.on_location(dormitory, hooks::Dormitory { bunk: loc(keys::BUNK)? });
    content.on_location(
        shop,
        hooks::MachineShop {
            here: shop,
            flask,
            spout: item(keys::SPOUT)?,
        },
    );
    content.on_location(lab, hooks::Lab { here: lab });
    content.on_location(bio_lock, hooks::BioLock { here: bio_lock });
    content.on_location(elevator, hooks::Elevator { here: elevator });
    content.on_item(flask, hooks::Flask);
    content.on_item(pip, hooks::Pip);
    content.start_actor(keys::VITALS);
    content.start_actor(keys::PIP);

    let actors: Vec<Box<dyn Actor<Game>>> = vec![
        Box::new(actors::Vitals::default()),
        Box::new(actors::Companion::new(pip, PIP_CHATTER)),
        Box::new(actors::Chase::new(lab, bio_lock, elevator)),
        Box::new(actors::Lift::new(elevator, roof)),
    ];
    tracing::debug!(actors = actors.len(), "demo pack built");

    Ok(Pack {
        world,
        content,
        actors,
        start: dormitory,
    })
}
