//! End-to-end normalization suite, ported case by case from real-world
//! formula corpora.

mod setup;

use setup::*;
use texnorm::{NormalizeError, Settings};

#[test]
fn brace_completion() {
    it("should complete omitted braces", || {
        assert_eq!(
            norm(r"x+\frac12+\vec a-\sqrt[2]5+\frac{\frac12}{\frac1{3}}")?,
            r"x + \frac{1}{2} + \vec{a} - \sqrt[2]{5} + \frac{\frac{1}{2}}{\frac{1}{3}}"
        );
        Ok(())
    });

    it("should treat all fraction spellings alike", || {
        assert_eq!(norm(r"\frac12")?, r"\frac{1}{2}");
        assert_eq!(norm(r"\frac1{2}")?, r"\frac{1}{2}");
        assert_eq!(norm(r"\frac{1}{2}")?, r"\frac{1}{2}");
        Ok(())
    });

    it("should keep explicit bracket groups", || {
        assert_eq!(norm(r"[3, 4]")?, r"[3 , 4]");
        Ok(())
    });
}

#[test]
fn script_order_canonicalization() {
    it("should put subscripts before superscripts", || {
        assert_eq!(
            norm(r"3 + y^{x+2}_{y+2} + \frac14")?,
            r"3 + y_{y + 2}^{x + 2} + \frac{1}{4}"
        );
        assert_eq!(norm(r"y^{x+2}_{y+2}")?, norm(r"y_{y+2}^{x+2}")?);
        Ok(())
    });

    it("should canonicalize scripted set notation", || {
        let settings = Settings::builder()
            .keep_left_right_marker(false)
            .normalize_token(true)
            .build();
        assert_eq!(
            norm_with(r"A^{n}_{m}", &settings)?,
            norm_with(r"A_{m}^{n}", &settings)?
        );
        Ok(())
    });
}

#[test]
fn token_normalization_options() {
    it("should map aliases when asked", || {
        assert_eq!(norm_with(r"x\geqslant y", &tokens_normalized())?, r"x \ge y");
        Ok(())
    });

    it("should fold similar capitals when asked", || {
        let settings = Settings::builder()
            .normalize_token(true)
            .ignore_similar_despite_capital(true)
            .build();
        assert_eq!(norm_with(r"X\geqslant Y", &settings)?, r"x \ge y");
        Ok(())
    });

    it("should substitute global characters", || {
        assert_eq!(
            norm_with(r"\sin 5π+\frac{\cos 2π}{5}", &tokens_normalized())?,
            r"\sin(5\pi) + \frac{\cos(2\pi)}{5}"
        );
        assert_eq!(
            norm_with(r"(-3s+\frac{1}{2}t)⋅(-7st^{2})", &tokens_normalized())?,
            r"(- 3s + \frac{1}{2} t) \cdot (- 7st^{2})"
        );
        assert_eq!(
            norm_with(
                r"(3x + 2y)^{2} - (x + 2y) (2y - x) – (12x^{2} y^{2} - 2x^{2} y) \div xy",
                &tokens_normalized()
            )?,
            r"(3x + 2y)^{2} - (x + 2y) (2y - x) - (12x^{2} y^{2} - 2x^{2} y) \div xy"
        );
        Ok(())
    });
}

#[test]
fn token_fusion() {
    it("should fuse complete function names", || {
        assert_eq!(norm(r"sinxcosx")?, r"\sin(x) \cos(x)");
        assert_eq!(norm(r"a sinx+bcosb=1")?, r"a \sin(x) + b \cos(b) = 1");
        assert_eq!(norm(r"sinxlgyln10")?, r"\sin(x) \lg(y) \ln(10)");
        Ok(())
    });

    it("should not fuse inside arc-prefixed names", || {
        assert_eq!(norm(r"arcsinx+arccosb=1")?, r"arcsinx + arccosb = 1");
        Ok(())
    });

    it("should nest fused functions", || {
        assert_eq!(norm(r"\cos ln3")?, r"\cos(\ln(3))");
        Ok(())
    });
}

#[test]
fn trigonometric_angles() {
    it("should strip angle markers when asked", || {
        let settings = Settings::builder().strip_angle_for_trig(true).build();
        assert_eq!(
            norm_with(r"\sin{x}+\cos\angle y", &settings)?,
            r"\sin(x) + \cos(y)"
        );
        assert_eq!(
            norm_with(r"\sin(\angle A + \angle B)", &settings)?,
            r"\sin(A + B)"
        );
        Ok(())
    });

    it("should keep angle markers otherwise", || {
        assert_eq!(norm(r"\angle A + \angle B")?, r"\angle A + \angle B");
        Ok(())
    });
}

#[test]
fn rm_blocks() {
    it("should drop the marker when asked", || {
        let settings = Settings::builder().keep_rm_sign(false).build();
        assert_eq!(norm_with(r"38\rm{kg}", &settings)?, "38 kg");
        assert_eq!(norm_with(r"\sin 4x\rm{kg}", &settings)?, r"\sin(4x) kg");
        assert_eq!(norm_with(r"\sin 5\pi\rm{kg}", &settings)?, r"\sin(5\pi) kg");
        Ok(())
    });

    it("should keep the marker by default", || {
        assert_eq!(norm(r"38\rm{kg}")?, r"38 \rm kg");
        Ok(())
    });
}

#[test]
fn degree_forms() {
    it("should render every degree spelling the same", || {
        for input in [r"60\degree", r"60^\degree", r"60^{\degree}", r"60^{\circ}"] {
            assert_eq!(norm_with(input, &tokens_normalized())?, r"60^{\circ}");
        }
        Ok(())
    });
}

#[test]
fn equation_groups() {
    it("should rewrap matrix rows", || {
        assert_eq!(
            norm(r"\left\{\begin{matrix}x^{2}+4y^{2}=36\\x+2y-8=0\end{matrix}\right.")?,
            r"\left \{ \begin{matrix} {x^{2} + 4y^{2} = 36} \\ {x + 2y - 8 = 0} \end{matrix} \right ."
        );
        assert_eq!(
            norm(r"\left\{\begin{matrix}\frac{x^{2}}{5}+y^{2}=1\\x=my+2\end{matrix}\right.")?,
            r"\left \{ \begin{matrix} {\frac{x^{2}}{5} + y^{2} = 1} \\ {x = my + 2} \end{matrix} \right ."
        );
        assert_eq!(
            norm(r"\left\{\begin{matrix}m=1\\n=\frac{1}{25}\end{matrix}\right.")?,
            r"\left \{ \begin{matrix} {m = 1} \\ {n = \frac{1}{25}} \end{matrix} \right ."
        );
        assert_eq!(
            norm(r"\left\{\begin{matrix}\frac{9}{25}m+16n=1\\\frac{16}{25}m+9n=1\end{matrix}\right.")?,
            r"\left \{ \begin{matrix} {\frac{9}{25} m + 16n = 1} \\ {\frac{16}{25} m + 9n = 1} \end{matrix} \right ."
        );
        Ok(())
    });

    it("should handle arrays inside left-right pairs", || {
        assert_eq!(
            norm(r"\left\{\begin{array}{l}{\frac{x^{2}}{a^{2}}+\frac{y^{2}}{a^{2}-9}=1} \\ {y=k(x-3)}\end{array} \Rightarrow \frac{x^{2}}{a^{2}}+\frac{k^{2}(x-3)^{2}}{a^{2}-a}=1\right.")?,
            r"\left \{ \begin{array}{l} {\frac{x^{2}}{a^{2}} + \frac{y^{2}}{a^{2} - 9} = 1} \\ {y = k (x - 3)} \end{array} \Rightarrow \frac{x^{2}}{a^{2}} + \frac{k^{2} (x - 3)^{2}}{a^{2} - a} = 1 \right ."
        );
        Ok(())
    });

    it("should normalize loose case environments", || {
        assert_eq!(
            norm(r"\begin{cases} {x=4}\\y=1\\ \end{cases}")?,
            r"\begin{cases} {x = 4} \\ {y = 1} \end{cases}"
        );
        Ok(())
    });

    it("should leave aligned rows unbraced", || {
        assert_eq!(
            norm(r"y= \begin{cases} x & (x \in (-1, 0])\\  x + x& (x> 0) \end{cases}")?,
            r"y = \begin{cases} x & (x \in (- 1 , 0]) \\ x + x & (x > 0) \end{cases}"
        );
        Ok(())
    });
}

#[test]
fn strictness_and_fallback() {
    it("should raise on invalid formulas in strict mode", || {
        for input in [r"(", r"[", r"\frac{1}"] {
            assert!(norm(input).is_err(), "{input} should fail");
        }
        Ok(())
    });

    it("should reconstruct tokens in lenient mode", || {
        let lenient = Settings::builder().ensure_valid_formula(false).build();
        assert_eq!(norm_with(r"\frac{1}", &lenient)?, r"\frac { 1 }");
        assert_eq!(norm_with(r" ( ", &lenient)?, "(");
        assert_eq!(norm_with(r") ( ", &lenient)?, ") (");
        Ok(())
    });

    it("should strip doubled outermost braces", || {
        let lenient = Settings::builder().ensure_valid_formula(false).build();
        assert_eq!(norm_with(r"{{abc}}", &lenient)?, "abc");
        Ok(())
    });
}

#[test]
fn brace_preservation() {
    it("should keep parentheses that carry meaning", || {
        let lenient = Settings::builder().ensure_valid_formula(false).build();
        assert_eq!(norm_with(r"a^{(2)}", &lenient)?, r"a^{(2)}");
        assert_eq!(norm_with(r"\frac{3}{(4)}", &lenient)?, r"\frac{3}{(4)}");
        Ok(())
    });

    it("should drop redundant inner braces", || {
        assert_eq!(
            norm(r"{\log_{m}(2)} + {\log_{m}(5)} = 2")?,
            r"\log_{m}(2) + \log_{m}(5) = 2"
        );
        assert_eq!(norm(r"{\log_{m}(10)} = 2")?, r"\log_{m}(10) = 2");
        assert_eq!(
            norm(r"f (x) = {(\frac{1}{2^{x}})}^{2} - \frac{1}{2^{x}} + 1")?,
            r"f (x) = (\frac{1}{2^{x}})^{2} - \frac{1}{2^{x}} + 1"
        );
        assert_eq!(
            norm(r"f (x) = \begin{cases} {| 2x + 1 |} , & (x \lt 1) \\ {\ln(x - 1)} , & (x \gt 1) \end{cases}")?,
            r"f (x) = \begin{cases} | 2x + 1 | , & (x \lt 1) \\ \ln(x - 1) , & (x \gt 1) \end{cases}"
        );
        assert_eq!(
            norm(r"\begin{cases} {x \lt \log_{a}(3) , (0 \lt a \lt 1)} \\ {x \gt \log_{a}(3) , (a \gt 1)} \end{cases}")?,
            r"\begin{cases} {x \lt \log_{a}(3) , (0 \lt a \lt 1)} \\ {x \gt \log_{a}(3) , (a \gt 1)} \end{cases}"
        );
        Ok(())
    });
}

#[test]
fn prime_marks() {
    it("should collapse prime runs to quotes", || {
        assert_eq!(norm(r"g^{\prime} (x) \gt 0")?, r"g' (x) \gt 0");
        assert_eq!(norm(r"g^{\prime} (x) \lt 0")?, r"g' (x) \lt 0");
        assert_eq!(norm(r"F^{\prime \prime} (x) \gt 0")?, r"F'' (x) \gt 0");
        assert_eq!(
            norm(r"F^{\prime} (x) = e^{x} + \frac{k}{x + 1} - (k + 1)")?,
            r"F' (x) = e^{x} + \frac{k}{x + 1} - (k + 1)"
        );
        assert_eq!(
            norm(r"g^{\prime} (x) = \frac{x - 2}{x}")?,
            r"g' (x) = \frac{x - 2}{x}"
        );
        Ok(())
    });
}

#[test]
fn overset_expressions() {
    it("should brace overset arguments", || {
        assert_eq!(
            norm(r"\overset{\to}{AC} = 3\overset{\to}{F_{2}C}")?,
            r"\overset{\to}{AC} = 3 \overset{\to}{F_{2} C}"
        );
        Ok(())
    });
}

#[test]
fn logarithms() {
    it("should leave single elements bare when asked", || {
        let settings = Settings::builder().brace_single_elem_for_log(false).build();
        assert_eq!(norm_with(r"\log_23", &settings)?, r"\log_{2}3");
        Ok(())
    });

    it("should parenthesize single elements by default", || {
        assert_eq!(norm(r"\log_23")?, r"\log_{2}(3)");
        Ok(())
    });
}

#[test]
fn absolute_values() {
    it("should render vert pairs as bars", || {
        assert_eq!(norm(r"\frac{\vert e \vert}{2}")?, r"\frac{|e|}{2}");
        assert_eq!(
            norm(r"\frac{\frac{\vert e \vert}{3}}{2}")?,
            r"\frac{\frac{|e|}{3}}{2}"
        );
        assert_eq!(norm(r"a+\vert -a \vert")?, r"a + |- a|");
        Ok(())
    });
}

#[test]
fn operator_families() {
    it("should handle scripted integrals", || {
        assert_eq!(
            norm_with(r" $\int_{0}^{\pi / 2} \sin ^{4} x \cos x d x$", &tokens_normalized())?,
            r"$ \int_{0}^{\pi / 2} \sin^{4}(x) \cos(xdx) $"
        );
        Ok(())
    });

    it("should handle inverse-style superscripts", || {
        assert_eq!(
            norm_with(r"\frac{d}{dx}tan^{-1} 3 x", &tokens_normalized())?,
            r"\frac{d}{dx} \tan^{- 1}(3x)"
        );
        Ok(())
    });

    it("should handle hyperbolic variants", || {
        assert_eq!(
            norm_with(r"\frac{d}{d x}\left(\csc ^{5} 3 x\right)", &tokens_normalized())?,
            r"\frac{d}{dx} \left (\csc^{5}(3x) \right)"
        );
        Ok(())
    });

    it("should bind parenthesized powers to the logarithm", || {
        assert_eq!(
            norm_with(r"\ln(2x - 1)^{2} = 7", &tokens_normalized())?,
            r"\ln((2x - 1)^{2}) = 7"
        );
        Ok(())
    });

    it("should fold greek factors into trig arguments", || {
        assert_eq!(
            norm_with(r"\frac{d}{dx}(e^{\cos \pi x})", &tokens_normalized())?,
            r"\frac{d}{dx} (e^{\cos(\pi x)})"
        );
        Ok(())
    });
}

#[test]
fn sentence_normalization() {
    it("should normalize each formula span", || {
        assert_eq!(
            norm_sentence(
                r"这是一次测试$x\geqslant y$, 或者也是$\frac3{4}$",
                &tokens_normalized()
            )?,
            r"这是一次测试$x \ge y$, 或者也是$\frac{3}{4}$"
        );
        assert_eq!(norm_sentence(r"$>$", &tokens_normalized())?, r"$\gt$");
        Ok(())
    });

    it("should leave literal runs untouched", || {
        let settings = Settings::builder()
            .normalize_token(true)
            .ignore_similar_despite_capital(true)
            .build();
        assert_eq!(norm_sentence(r"X$X > C$Y", &settings)?, r"X$x \gt c$Y");
        assert_eq!(norm_sentence(r"Z$x > C$Z", &settings)?, r"Z$x \gt c$Z");
        Ok(())
    });

    it("should propagate strict errors from spans", || {
        let strict = tokens_normalized();
        assert!(norm_sentence(r"这是一次测试$x\geqslant y$, 或者也是$\frac3$", &strict).is_err());
        assert!(norm_sentence(r"这是一次测试$($, 或者也是$\frac3{4}$", &strict).is_err());
        Ok(())
    });

    it("should degrade spans in lenient mode", || {
        let lenient = Settings::builder()
            .normalize_token(true)
            .ensure_valid_formula(false)
            .build();
        assert_eq!(
            norm_sentence(r"这是一次测试$x\geqslant y$, 或者也是$\frac3$", &lenient)?,
            r"这是一次测试$x \ge y$, 或者也是$\frac 3$"
        );
        assert_eq!(
            norm_sentence(r"这是一次测试$ ) ($, 或者也是$\frac3$", &lenient)?,
            r"这是一次测试$) ($, 或者也是$\frac 3$"
        );
        Ok(())
    });

    it("should expand spoken units into the formula", || {
        assert_eq!(
            norm_sentence(r"其中$64$米的长度", &Settings::default())?,
            r"其中$64 \rm m$的长度"
        );
        Ok(())
    });
}

#[test]
fn idempotence() {
    it("should be stable on its own canonical output", || {
        for input in [
            r"\frac{1}{2}",
            r"x + y",
            r"\sin(x)",
            r"\log_{2}(3)",
            r"y_{y + 2}^{x + 2}",
            r"\sqrt[3]{5}",
            r"\overset{\to}{AC}",
            r"\begin{cases} {x = 4} \\ {y = 1} \end{cases}",
        ] {
            let once = norm(input)?;
            assert_eq!(once, input, "first pass should already be canonical");
            assert_eq!(norm(&once)?, once, "second pass must be stable");
        }
        Ok(())
    });
}

#[test]
fn error_kinds() {
    it("should classify environment errors as non-syntax", || {
        let err = norm(r"\begin{align} x \end{align}").unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidEnvironment { .. }));
        // lenient mode must not swallow it
        let lenient = Settings::builder().ensure_valid_formula(false).build();
        assert!(norm_with(r"\begin{align} x \end{align}", &lenient).is_err());
        Ok(())
    });
}
