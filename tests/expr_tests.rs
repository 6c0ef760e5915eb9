use exprvm::syntax::*;
use exprvm::*;
use pretty_assertions::assert_eq;
use rand::Rng;

fn run(code: &str, tuple: Option<Tuple>) -> QueryResult<Operand> {
    let _ = env_logger::try_init();
    let mut runner = Runner::new();
    let code = hex::decode(code).unwrap();
    runner.decode(&code)?;
    if let Some(tuple) = tuple {
        runner.bind_tuple(tuple);
    }
    runner.run()?;
    Ok(runner.get())
}

fn test_expr(code: &str, expected: Operand) {
    assert_eq!(run(code, None), Ok(expected));
}

fn test_expr_with(code: &str, tuple: Tuple, expected: Operand) {
    assert_eq!(run(code, Some(tuple)), Ok(expected));
}

#[test]
fn test_int_constants() {
    test_expr("1101", Int32(1));
    test_expr("2101", Int32(-1));
    test_expr("119601", Int32(150));
    test_expr("219601", Int32(-150));
    test_expr("1200", Int64(0));
    test_expr("12FFFFFFFFFFFFFFFF7F", Int64(i64::MAX));
}

#[test]
fn test_bool_constants() {
    test_expr("13", Bool(true));
    test_expr("23", Bool(false));
}

#[test]
fn test_float_constants() {
    test_expr("15401F333333333333", Operand::from(7.8f64));
    test_expr("1541B1E1A300000000", Operand::from(3E8f64));
    test_expr("1441200000", Operand::from(10.0f32));
}

#[test]
fn test_float_bit_patterns_survive() {
    for v in [0.1f64, -0.0, f64::MIN_POSITIVE, 1e300, f64::INFINITY] {
        let code = format!("15{}", hex::encode(v.to_be_bytes()));
        match run(&code, None) {
            Ok(Operand::Float64(x)) => assert_eq!(x.into_inner().to_bits(), v.to_bits()),
            other => panic!("unexpected {:?}", other),
        }
    }
}

#[test]
fn test_string_constants() {
    test_expr("1703616263", Str("abc"));
    test_expr("1700", Str(""));
    test_expr("17036162631701619307", Bool(true));
}

#[test]
fn test_null_constants() {
    test_expr("01", Null);
    test_expr("07", Null);
    test_expr("00", Null);
}

#[test]
fn test_arithmetic() {
    test_expr("110111018301", Int32(2));
    test_expr("120212038302", Int64(5));
    test_expr("11031104110685018301", Int32(27));
    test_expr("110711028401", Int32(5));
    test_expr("110711028601", Int32(3));
    test_expr("210711028601", Int32(-3));
    test_expr("110711028701", Int32(1));
    test_expr("11058201", Int32(-5));
    test_expr("11028101", Int32(2));
}

#[test]
fn test_relational() {
    test_expr("110511068301110B9101", Bool(true));
    test_expr("110711088301110E930111061105950152", Bool(false));
    test_expr("110111019201", Bool(true));
    test_expr("110111029401", Bool(true));
    test_expr("110111029601", Bool(true));
    test_expr("1701611701629507", Bool(true));
}

#[test]
fn test_division_by_zero_is_null() {
    test_expr("110711008601", Null);
    test_expr("110711008701", Null);
    test_expr("120712008602", Null);
    test_expr("153FF00000000000001500000000000000008605", Null);
}

#[test]
fn test_overflow() {
    // int64 max + 1
    assert_eq!(run("12FFFFFFFFFFFFFFFF7F12018302", None), Err(QueryError::Overflow(Type::Int64)));
    // int32 max * 2
    assert_eq!(run("11FFFFFFFF0711028501", None), Err(QueryError::Overflow(Type::Int32)));
    // checked cast of int64 max to int32
    assert_eq!(run("12FFFFFFFFFFFFFFFF7FFC12", None), Err(QueryError::Overflow(Type::Int32)));
    // int32 min / -1
    assert_eq!(run("21808080800821018601", None),
               Err(QueryError::Overflow(Type::Int32)));
    // int32 min % -1
    test_expr("21808080800821018701", Int32(0));
}

#[test]
fn test_abs() {
    test_expr("2105B301", Int32(5));
    test_expr("218080808008B301", Int32(i32::MIN));
    assert_eq!(run("218080808008B401", None), Err(QueryError::Overflow(Type::Int32)));
    test_expr("1105110AB101", Int32(5));
    test_expr("1105110AB201", Int32(10));
}

#[test]
fn test_three_valued_logic() {
    test_expr("230352", Bool(false));
    test_expr("130352", Null);
    test_expr("030352", Null);
    test_expr("130353", Bool(true));
    test_expr("230353", Null);
    test_expr("0351", Null);
    test_expr("1351", Bool(false));
    test_expr("032352", Bool(false));
}

#[test]
fn test_null_tests() {
    test_expr("01A101", Bool(true));
    test_expr("1101A201", Bool(true));
    test_expr("1100A201", Bool(false));
    test_expr("1100A301", Bool(true));
    test_expr("01A201", Bool(false));
    test_expr("01A301", Bool(false));
    test_expr("1703302E30A207", Bool(false));
    test_expr("170378797AA307", Bool(true));
}

#[test]
fn test_casts() {
    test_expr("1115F021", Int64(21));
    test_expr("1115F051", Operand::from(21.0f64));
    test_expr("1115F071", Str("21"));
    test_expr("1100F031", Bool(false));
    test_expr("13F073", Str("true"));
    test_expr("1541B1E1A300000000F075", Str("300000000.0"));
    test_expr("15401F333333333333F015", Int32(8));
    test_expr("15C004000000000000F015", Int32(-3));
    test_expr("17023432F017", Int32(42));
    test_expr("17023432FC17", Int32(42));
    assert_eq!(run("170178F017", None),
               Err(QueryError::InvalidCast { value: "x".to_string(), target: Type::Int32 }));
    test_expr("01F021", Null);
}

#[test]
fn test_checked_casts() {
    test_expr("12FFFFFFFF07FC12", Int32(i32::MAX));
    assert_eq!(run("1541E0000000000000FC15", None), Err(QueryError::Overflow(Type::Int32)));
    test_expr("1541DFFFFFFFC00000FC15", Int32(i32::MAX));
    // f64::MAX narrowed to float
    assert_eq!(run("157FEFFFFFFFFFFFFFFC45", None), Err(QueryError::Overflow(Type::Float32)));
    test_expr("157FEFFFFFFFFFFFFFF045", Operand::from(f32::INFINITY));
}

#[test]
fn test_indexed_variables() {
    test_expr_with("310031018301", vec![Int32(1), Int32(2)], Int32(3));
    test_expr_with("350035018305", vec![Operand::from(3.5f64), Operand::from(4.6f64)], Operand::from(8.1f64));
    test_expr_with("3501128080808008F0529505", vec![Operand::from(3.5f64), Operand::from(4.6f64)], Bool(true));
    test_expr_with("370037019307", vec![Str("abc"), Str("aBc")], Bool(true));
    test_expr_with("310011018301", vec![Null], Null);
}

#[test]
fn test_unbound_variable() {
    assert_eq!(run("3100", None), Err(QueryError::UnboundTuple));
}

#[test]
fn test_string_functions() {
    test_expr("1703616263F123", Str("ABC"));
    test_expr("1703414243F122", Str("abc"));
    test_expr("1703616263170164F121", Str("abcd"));
    test_expr("170561626364651102F124", Str("ab"));
    test_expr("170561626364651102F125", Str("de"));
    test_expr("170420616220F126", Str("ab"));
    test_expr("170420616220F128", Str("ab "));
    test_expr("170420616220F12A", Str(" ab"));
    test_expr("170661626364656611011103F12C", Str("bc"));
    test_expr("17066162636465661102F12D", Str("cdef"));
    test_expr("170661626364656611021103F12E", Str("bcd"));
    test_expr("17066162636465661105F12F", Str("ef"));
    test_expr("0701F124", Null);
}

#[test]
fn test_math_functions() {
    test_expr("153FF3333333333333F101", Operand::from(2.0f64));
    test_expr("153FF3333333333333F102", Operand::from(1.0f64));
    test_expr("150000000000000000F110", Operand::from(1.0f64));
    test_expr("153FF0000000000000F111", Operand::from(0.0f64));
    test_expr("05F107", Null);
}

#[test]
fn test_string_subtraction_concatenates() {
    test_expr("170261621701638407", Str("abc"));
}

#[test]
fn test_min_max() {
    test_expr("11031107B101", Int32(3));
    test_expr("11031107B201", Int32(7));
    test_expr("011107B101", Null);
    test_expr("170162170161B207", Str("b"));
}

#[test]
fn test_decimal() {
    test_expr("160531322E3334", Dec("12.34"));
    test_expr("160531322E3334160531322E33348306", Dec("24.68"));
    test_expr("160531322E3334160531322E33348406", Dec("0"));
    test_expr("160531322E3334160531322E33348506", Dec("152.2756"));
    test_expr("160531322E33341601328606", Dec("6.17"));
    test_expr("160531322E33341601308606", Null);
    test_expr("1115F061", Dec("21"));
    test_expr("160531322E3334F016", Int32(12));
    test_expr("160531322E3334F076", Str("12.34"));
    test_expr("160531322E33348206", Dec("-12.34"));
    test_expr("1605312E353030F016", Int32(2));
}

#[test]
fn test_get_type() {
    let mut runner = Runner::new();
    runner.decode(&hex::decode("310011019301").unwrap()).unwrap();
    assert_eq!(runner.get_type(), Type::Bool);
    runner.decode(&hex::decode("1115F061").unwrap()).unwrap();
    assert_eq!(runner.get_type(), Type::Decimal);
    runner.decode(&[]).unwrap();
    assert_eq!(runner.get_type(), Type::Null);
}

#[test]
fn test_get_as_and_get_all() {
    let mut runner = Runner::new();
    runner.decode(&hex::decode("31003701").unwrap()).unwrap();
    let (result, tuple) = runner.eval(vec![Int32(4), Str("x")]).unwrap();
    assert_eq!(result, Str("x"));
    assert_eq!(tuple, vec![Int32(4), Str("x")]);
    assert_eq!(runner.get_all(), vec![Int32(4), Str("x")]);
    assert_eq!(runner.get_as::<String>(), Ok(Some("x".to_string())));
    assert!(runner.get_as::<i32>().is_err());
}

#[test]
fn test_unknown_codes() {
    assert_eq!(run("11016101", None), Err(QueryError::UnknownCode(vec![0x61, 0x01])));
    assert_eq!(run("130385", None), Err(QueryError::Truncated(vec![0x85])));
    assert_eq!(run("13038503", None), Err(QueryError::UnknownCode(vec![0x85, 0x03])));
}

fn random_operand(t: Type, rng: &mut impl Rng) -> Operand {
    match t {
        Type::Int32 => Int32(rng.random_range(-1000..1000)),
        Type::Int64 => Int64(rng.random_range(-1000..1000)),
        Type::Float32 => Operand::from(rng.random::<f32>()),
        Type::Float64 => Operand::from(rng.random::<f64>()),
        Type::Decimal => Operand::Decimal(Decimal::from(rng.random_range(-1000..1000i32))),
        Type::String => Str(&format!("s{}", rng.random::<u16>())),
        Type::Bool => Bool(rng.random()),
        Type::Null => Null,
    }
}

#[test]
fn test_null_propagation() {
    let mut rng = rand::rng();
    let numeric = [Type::Int32, Type::Int64, Type::Float32, Type::Float64, Type::Decimal];
    let mut cases = vec![];
    for op in [0x83u8, 0x84, 0x85, 0x86, 0x91, 0x92, 0x93, 0x94, 0x95, 0x96, 0xB1, 0xB2] {
        for &t in numeric.iter() {
            cases.push((op, t));
        }
        if op != 0x85 && op != 0x86 {
            cases.push((op, Type::String));
        }
    }
    for &t in numeric.iter().take(2) {
        cases.push((0x87, t));
    }
    for (op, t) in cases {
        let code = t.code();
        for _ in 0..5 {
            let value = random_operand(t, &mut rng);
            // null <op> $0
            let lhs_null = format!("{:02X}{:02X}00{:02X}{:02X}", code, 0x30 | code, op, code);
            // $0 <op> null
            let rhs_null = format!("{:02X}00{:02X}{:02X}{:02X}", 0x30 | code, code, op, code);
            assert_eq!(run(&lhs_null, Some(vec![value.clone()])), Ok(Null), "{}", lhs_null);
            assert_eq!(run(&rhs_null, Some(vec![value])), Ok(Null), "{}", rhs_null);
        }
    }
}
