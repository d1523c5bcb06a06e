use std::cell::RefCell;
use std::rc::Rc;

use broker::Disposable;
use game_core::{
    CreatureModifier, DoubleAttack, Flat, Game, IncreaseDefense, Multiply, Query, QueryKind,
};

#[test]
fn modifiers_on_the_same_kind_apply_in_attach_order() {
    let game = Game::new();
    let goblin = game.spawn("Goblin", 3, 3);

    let add_first = CreatureModifier::attach(&goblin, Flat::new(QueryKind::Attack, 1));
    let then_double = CreatureModifier::attach(&goblin, Multiply::new(QueryKind::Attack, 2));
    assert_eq!(goblin.attack(), Ok(8));

    add_first.dispose();
    then_double.dispose();

    let _double_first = CreatureModifier::attach(&goblin, Multiply::new(QueryKind::Attack, 2));
    let _then_add = CreatureModifier::attach(&goblin, Flat::new(QueryKind::Attack, 1));
    assert_eq!(goblin.attack(), Ok(7));
}

#[test]
fn disjoint_kinds_compose_regardless_of_attach_order() {
    let game = Game::new();
    let a = game.spawn("A", 3, 3);
    let _double = CreatureModifier::attach(&a, DoubleAttack);
    let _shield = CreatureModifier::attach(&a, IncreaseDefense::new(1));

    let b = game.spawn("B", 3, 3);
    let _shield_b = CreatureModifier::attach(&b, IncreaseDefense::new(1));
    let _double_b = CreatureModifier::attach(&b, DoubleAttack);

    assert_eq!(a.attack(), Ok(6));
    assert_eq!(a.defense(), Ok(4));
    assert_eq!(b.attack(), Ok(6));
    assert_eq!(b.defense(), Ok(4));
}

#[test]
fn disposal_only_affects_later_reads() {
    let game = Game::new();
    let goblin = game.spawn("Goblin", 3, 3);
    let double = CreatureModifier::attach(&goblin, DoubleAttack);

    let before = goblin.attack().unwrap();
    let mut captured = Query::new(goblin.id(), QueryKind::Attack, 3);
    game.queries().publish(&mut captured).unwrap();

    double.dispose();

    assert_eq!(before, 6);
    assert_eq!(captured.value, 6);
    assert_eq!(goblin.attack(), Ok(3));
}

#[test]
fn disposing_twice_matches_disposing_once() {
    let game = Game::new();
    let goblin = game.spawn("Goblin", 3, 3);
    let double = CreatureModifier::attach(&goblin, DoubleAttack);
    let _shield = CreatureModifier::attach(&goblin, IncreaseDefense::new(1));

    double.dispose();
    let once = (game.queries().len(), goblin.attack(), goblin.defense());
    double.dispose();
    let twice = (game.queries().len(), goblin.attack(), goblin.defense());

    assert_eq!(once, twice);
    assert_eq!(once, (1, Ok(3), Ok(4)));
}

#[test]
fn dropped_modifier_is_skipped_and_others_still_run() {
    let game = Game::new();
    let goblin = game.spawn("Goblin", 3, 3);
    let first = CreatureModifier::attach(&goblin, Flat::new(QueryKind::Attack, 1));
    let dropped = CreatureModifier::attach(&goblin, DoubleAttack);
    let last = CreatureModifier::attach(&goblin, Flat::new(QueryKind::Attack, 10));

    drop(dropped);

    let mut query = Query::new(goblin.id(), QueryKind::Attack, 3);
    assert_eq!(game.queries().publish(&mut query), Ok(2));
    assert_eq!(query.value, 14);
    assert!(first.is_active());
    assert!(last.is_active());
}

#[test]
fn attributes_are_recomputed_on_every_read() {
    let game = Game::new();
    let goblin = game.spawn("Goblin", 3, 3);

    let first = goblin.attack();
    let _double = CreatureModifier::attach(&goblin, DoubleAttack);
    let second = goblin.attack();

    assert_eq!(first, Ok(3));
    assert_eq!(second, Ok(6));
    assert_ne!(first, second);
}

#[test]
fn goblin_scenario() {
    let game = Game::new();
    let goblin = game.spawn("Goblin", 2, 2);
    assert_eq!(
        goblin.snapshot().unwrap().to_string(),
        "Name: Goblin, Attack: 2, Defense: 2"
    );

    let double = CreatureModifier::attach(&goblin, DoubleAttack);
    assert_eq!(goblin.attack(), Ok(4));

    let bonus = IncreaseDefense::from_config(game.config());
    let shield = CreatureModifier::attach(&goblin, bonus);
    assert_eq!(goblin.defense(), Ok(5));
    assert_eq!(goblin.attack(), Ok(4));

    shield.dispose();
    assert_eq!(goblin.defense(), Ok(2));

    double.dispose();
    assert_eq!(goblin.attack(), Ok(2));
    assert!(game.queries().is_empty());
}

#[test]
fn modifier_disposed_by_another_modifier_mid_read_applies_until_next_read() {
    let game = Game::new();
    let goblin = game.spawn("Goblin", 2, 2);
    let victim_slot: Rc<RefCell<Option<CreatureModifier<DoubleAttack>>>> = Rc::default();

    let trigger = Rc::new(());
    let slot = Rc::clone(&victim_slot);
    let _dispel = game.queries().subscribe(&trigger, move |_, query: &mut Query| {
        if query.kind == QueryKind::Attack
            && let Some(victim) = slot.borrow().as_ref()
        {
            victim.dispose();
        }
    });
    *victim_slot.borrow_mut() = Some(CreatureModifier::attach(&goblin, DoubleAttack));
    let _bonus = CreatureModifier::attach(&goblin, Flat::new(QueryKind::Attack, 1));

    // The read already in progress still doubles: (2 * 2) + 1.
    assert_eq!(goblin.attack(), Ok(5));
    assert_eq!(game.queries().len(), 2);
    assert!(!victim_slot.borrow().as_ref().unwrap().is_active());

    assert_eq!(goblin.attack(), Ok(3));
}

#[test]
fn handler_can_read_another_creature_mid_publish() {
    let game = Game::new();
    let goblin = game.spawn("Goblin", 2, 2);
    let ally = Rc::new(game.spawn("Ally", 1, 7));
    let goblin_id = goblin.id();

    let nested: Rc<RefCell<Option<broker::Result<i32>>>> = Rc::default();
    let seen = Rc::clone(&nested);
    let target = Rc::clone(&ally);
    let _rally = game.queries().subscribe(&target, move |ally, query: &mut Query| {
        if !query.targets(goblin_id, QueryKind::Attack) {
            return;
        }
        let defense = ally.defense();
        if let Ok(bonus) = defense.as_ref() {
            query.value += *bonus;
        }
        *seen.borrow_mut() = Some(defense);
    });

    assert_eq!(goblin.attack(), Ok(9));
    assert_eq!(nested.borrow_mut().take(), Some(Ok(7)));
    assert_eq!(ally.defense(), Ok(7));
}
