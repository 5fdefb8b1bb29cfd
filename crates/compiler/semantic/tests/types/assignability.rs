use move_ide_semantic::{is_assignable, MoveType};

#[test]
fn test_assignability_examples() {
    let mut_u64 = MoveType::reference(true, MoveType::U64);
    let imm_u64 = MoveType::reference(false, MoveType::U64);

    assert!(is_assignable(&mut_u64, &imm_u64));
    assert!(!is_assignable(&imm_u64, &mut_u64));
    assert!(is_assignable(&MoveType::Unknown, &MoveType::Bool));
    assert!(!is_assignable(&MoveType::U8, &MoveType::U64));
}

#[test]
fn test_assignability_is_reflexive() {
    let types = [
        MoveType::U8,
        MoveType::U256,
        MoveType::Bool,
        MoveType::Address,
        MoveType::Signer,
        MoveType::Void,
        MoveType::vector(MoveType::U8),
        MoveType::reference(false, MoveType::Signer),
        MoveType::Struct {
            name: "Coin".to_string(),
            module: Some("0x1::coin".to_string()),
        },
    ];
    for ty in &types {
        assert!(is_assignable(ty, ty), "{ty} should be assignable to itself");
    }
}

#[test]
fn test_struct_identity_includes_module() {
    let local = MoveType::Struct {
        name: "Coin".to_string(),
        module: None,
    };
    let qualified = MoveType::Struct {
        name: "Coin".to_string(),
        module: Some("0x1::coin".to_string()),
    };
    assert!(!is_assignable(&local, &qualified));
}

#[test]
fn test_nested_references() {
    let inner_mut = MoveType::reference(true, MoveType::reference(true, MoveType::U8));
    let inner_imm = MoveType::reference(false, MoveType::reference(false, MoveType::U8));
    assert!(is_assignable(&inner_mut, &inner_imm));
    assert!(!is_assignable(&inner_imm, &inner_mut));
}
