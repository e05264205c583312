// shared sanity-test vectors for the decomposition strategies. in the
// comments below, three numbers are spaced by 1 ulp apart and the middle one
// is being decomposed.

use super::{decode, DecodableFloat, Decimal, Decoded, FullDecoded};

pub fn decode_finite<T: DecodableFloat>(v: T) -> Decoded {
    match decode(v).1 {
        FullDecoded::Finite(decoded) => decoded,
        full => panic!("expected finite, got {full:?}"),
    }
}

pub fn f32_shortest_sanity_test<F>(mut f: F)
where
    F: FnMut(&Decoded) -> Decimal,
{
    // 0.0999999940395355224609375
    // 0.100000001490116119384765625
    // 0.10000000894069671630859375
    assert_eq!(f(&decode_finite(0.1f32)), Decimal { sig: 1, exp: -1 });

    // 0.333333313465118408203125
    // 0.3333333432674407958984375 (1/3 in the default rounding)
    // 0.33333337306976318359375
    assert_eq!(
        f(&decode_finite(1.0f32 / 3.0)),
        Decimal {
            sig: 33333334,
            exp: -8
        }
    );

    // 10^1 * 0.31415917873382568359375
    // 10^1 * 0.31415920257568359375
    // 10^1 * 0.31415922641754150390625
    assert_eq!(
        f(&decode_finite(3.141592f32)),
        Decimal {
            sig: 3141592,
            exp: -6
        }
    );

    // 10^18 * 0.31415916243714048
    // 10^18 * 0.314159196796878848
    // 10^18 * 0.314159231156617216
    assert_eq!(
        f(&decode_finite(3.141592e17f32)),
        Decimal {
            sig: 3141592,
            exp: 11
        }
    );

    // 10^39 * 0.340282326356119256160033759537265639424
    // 10^39 * 0.34028234663852885981170418348451692544
    // 10^39 * 0.340282366920938463463374607431768211456
    assert_eq!(
        f(&decode_finite(f32::MAX)),
        Decimal {
            sig: 34028235,
            exp: 31
        }
    );

    // 10^-37 * 0.1175494210692441075487029444849287348827...
    // 10^-37 * 0.1175494350822287507968736537222245677818...
    // 10^-37 * 0.1175494490952133940450443629595204006810...
    assert_eq!(
        f(&decode_finite(f32::MIN_POSITIVE)),
        Decimal {
            sig: 11754944,
            exp: -45
        }
    );

    // 10^-44 * 0
    // 10^-44 * 0.1401298464324817070923729583289916131280...
    // 10^-44 * 0.2802596928649634141847459166579832262560...
    assert_eq!(
        f(&decode_finite(f32::from_bits(1))),
        Decimal { sig: 1, exp: -45 }
    );
}

pub fn f64_shortest_sanity_test<F>(mut f: F)
where
    F: FnMut(&Decoded) -> Decimal,
{
    // 0.0999999999999999777955395074968691915273...
    // 0.1000000000000000055511151231257827021181...
    // 0.1000000000000000333066907387546962127089...
    assert_eq!(f(&decode_finite(0.1f64)), Decimal { sig: 1, exp: -1 });

    // this example is explicitly mentioned in the Grisu paper.
    // 10^3 * 0.0999999999999999857891452847979962825775...
    // 10^3 * 0.1 (exact)
    // 10^3 * 0.1000000000000000142108547152020037174224...
    assert_eq!(f(&decode_finite(100.0f64)), Decimal { sig: 1, exp: 2 });

    // 0.3333333333333332593184650249895639717578...
    // 0.3333333333333333148296162562473909929394... (1/3 in the default rounding)
    // 0.3333333333333333703407674875052180141210...
    assert_eq!(
        f(&decode_finite(1.0f64 / 3.0)),
        Decimal {
            sig: 3333333333333333,
            exp: -16
        }
    );

    // explicit test case for equally closest representations.
    // Dragon has its own tie-breaking rule; Grisu should fall back.
    // 10^1 * 0.1000007629394531027955395074968691915273...
    // 10^1 * 0.100000762939453125 (exact)
    // 10^1 * 0.1000007629394531472044604925031308084726...
    assert_eq!(
        f(&decode_finite(1.00000762939453125f64)),
        Decimal {
            sig: 10000076293945313,
            exp: -16
        }
    );

    // 10^1 * 0.3141591999999999718085064159822650253772...
    // 10^1 * 0.3141592000000000162174274009885266423225...
    // 10^1 * 0.3141592000000000606263483859947882592678...
    assert_eq!(
        f(&decode_finite(3.141592f64)),
        Decimal {
            sig: 3141592,
            exp: -6
        }
    );

    // 10^18 * 0.314159199999999936
    // 10^18 * 0.3141592 (exact)
    // 10^18 * 0.314159200000000064
    assert_eq!(
        f(&decode_finite(3.141592e17f64)),
        Decimal {
            sig: 3141592,
            exp: 11
        }
    );

    // pathological case: high = 10^23 (exact). tie breaking should always
    // prefer that.
    // 10^24 * 0.099999999999999974834176
    // 10^24 * 0.099999999999999991611392
    // 10^24 * 0.100000000000000008388608
    assert_eq!(f(&decode_finite(1.0e23f64)), Decimal { sig: 1, exp: 23 });

    // 10^309 * 0.1797693134862315508561243283845062402343...
    // 10^309 * 0.1797693134862315708145274237317043567980...
    // 10^309 * 0.1797693134862315907729305190789024733617...
    assert_eq!(
        f(&decode_finite(f64::MAX)),
        Decimal {
            sig: 17976931348623157,
            exp: 292
        }
    );

    // 10^-307 * 0.2225073858507200889024586876085859887650...
    // 10^-307 * 0.2225073858507201383090232717332404064219...
    // 10^-307 * 0.2225073858507201877155878558578948240788...
    assert_eq!(
        f(&decode_finite(f64::MIN_POSITIVE)),
        Decimal {
            sig: 22250738585072014,
            exp: -324
        }
    );

    // 10^-323 * 0
    // 10^-323 * 0.4940656458412465441765687928682213723650...
    // 10^-323 * 0.9881312916824930883531375857364427447301...
    assert_eq!(
        f(&decode_finite(f64::from_bits(1))),
        Decimal { sig: 5, exp: -324 }
    );
}

pub fn more_shortest_sanity_test<F>(mut f: F)
where
    F: FnMut(&Decoded) -> Decimal,
{
    // the rounding interval around 10^17 - 1/2 either includes 10^17 or not
    // depending on the inclusivity, swinging the answer between one digit
    // and seventeen.
    assert_eq!(
        f(&Decoded {
            mant: 99_999_999_999_999_999,
            minus: 1,
            plus: 1,
            exp: 0,
            inclusive: true
        }),
        Decimal { sig: 1, exp: 17 }
    );
    assert_eq!(
        f(&Decoded {
            mant: 99_999_999_999_999_999,
            minus: 1,
            plus: 1,
            exp: 0,
            inclusive: false
        }),
        Decimal {
            sig: 99_999_999_999_999_999,
            exp: 0
        }
    );
}
